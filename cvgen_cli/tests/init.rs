mod common;

use cvgen_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::cvgen_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created cvgen.toml"))
		.stdout(predicates::str::contains("Created data.yaml"))
		.stdout(predicates::str::contains("Created recipes.yaml"))
		.stdout(predicates::str::contains("Next steps:"));

	for file in [
		"cvgen.toml",
		"data.yaml",
		"recipes.yaml",
		"templates/resume.tex",
		"templates/section.tex",
		"templates/project.tex",
		"templates/experience.tex",
		"templates/education.tex",
	] {
		assert!(tmp.path().join(file).is_file(), "missing {file}");
	}

	let template = std::fs::read_to_string(tmp.path().join("templates/project.tex"))?;
	assert!(template.contains(r"\cventry"));

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let data_path = tmp.path().join("data.yaml");
	std::fs::write(&data_path, "skills: {}\n")?;

	common::cvgen_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Skipped data.yaml (already exists)"))
		.stdout(predicates::str::contains("Created recipes.yaml"));

	assert_eq!(std::fs::read_to_string(&data_path)?, "skills: {}\n");

	Ok(())
}

#[test]
fn init_twice_creates_nothing_new() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::cvgen_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::cvgen_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created").not())
		.stdout(predicates::str::contains("Next steps").not());

	Ok(())
}
