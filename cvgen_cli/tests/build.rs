mod common;

use std::path::Path;

use cvgen_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

fn init_project(root: &Path) {
	common::cvgen_cmd()
		.arg("init")
		.arg("--path")
		.arg(root)
		.assert()
		.success();
}

#[test]
fn no_arguments_prints_usage() {
	common::cvgen_cmd()
		.assert()
		.success()
		.stdout(predicates::str::contains("Usage:"));
}

#[test]
fn build_without_compiling() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());

	common::cvgen_cmd()
		.arg("--no-compile")
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Built recipe `default` into build"))
		.stdout(predicates::str::contains("compilation skipped"))
		.stderr(predicates::str::contains("no style file found"));

	let build_dir = tmp.path().join("build");
	let entry = std::fs::read_to_string(build_dir.join("resume.tex"))?;
	assert!(entry.contains("\\input{resume/summary.tex}\n\\input{resume/skills.tex}\n"));
	for key in ["summary", "skills", "projects", "experience", "education"] {
		assert!(build_dir.join("resume").join(format!("{key}.tex")).is_file());
	}

	let projects = std::fs::read_to_string(build_dir.join("resume/projects.tex"))?;
	assert!(projects.contains(r"\item {\textbf{Technologies}: Rust, LaTeX}"));
	assert!(projects.contains(r"\hspace{1mm} \bullet \hspace{1mm} Keeps bullet order exactly as written"));

	Ok(())
}

#[test]
fn verbose_build_lists_written_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());

	common::cvgen_cmd()
		.arg("--verbose")
		.arg("--no-compile")
		.arg("backend")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("resume.tex"))
		.stdout(predicates::str::contains("experience.tex"))
		.stdout(predicates::str::contains("projects.tex").not());

	Ok(())
}

#[test]
fn unknown_recipe_fails_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());

	common::cvgen_cmd()
		.arg("--no-compile")
		.arg("nope")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("recipe `nope` not found"))
		.stderr(predicates::str::contains("backend, default"));

	assert!(!tmp.path().join("build").exists());

	Ok(())
}

#[test]
fn missing_entity_fails_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("data.yaml"), "skills:\n  rust: Rust\n")?;
	std::fs::write(
		tmp.path().join("recipes.yaml"),
		"web:\n  projects:\n    - ghost\n",
	)?;

	common::cvgen_cmd()
		.arg("--no-compile")
		.arg("web")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("projects `ghost`"));

	assert!(!tmp.path().join("build").exists());

	Ok(())
}

#[test]
fn missing_data_file_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::cvgen_cmd()
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no data source found"));

	Ok(())
}

#[test]
fn dry_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());

	common::cvgen_cmd()
		.arg("--dry-run")
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Dry run: would write 6 file(s)"))
		.stdout(predicates::str::contains("resume.tex [new]"));

	assert!(!tmp.path().join("build").exists());

	Ok(())
}

#[test]
fn dry_run_diff_against_previous_build() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());

	common::cvgen_cmd()
		.arg("--no-compile")
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::cvgen_cmd()
		.arg("--dry-run")
		.arg("--diff")
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("[changed]").not())
		.stdout(predicates::str::contains("[new]").not());

	let data_path = tmp.path().join("data.yaml");
	let data = std::fs::read_to_string(&data_path)?;
	std::fs::write(
		&data_path,
		data.replace("Thesis on incremental parsing", "Thesis on parallel parsing"),
	)?;

	common::cvgen_cmd()
		.arg("--dry-run")
		.arg("--diff")
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("education.tex [changed]"))
		.stdout(predicates::str::contains("-\\item {Thesis on incremental parsing}"))
		.stdout(predicates::str::contains("+\\item {Thesis on parallel parsing}"));

	Ok(())
}

#[test]
fn dry_run_lists_style_file_and_stale_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());
	std::fs::write(tmp.path().join("templates/awesome-cv.cls"), "% style")?;

	common::cvgen_cmd()
		.arg("--no-compile")
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();
	std::fs::write(tmp.path().join("build/resume.pdf"), "%PDF")?;

	common::cvgen_cmd()
		.arg("--dry-run")
		.arg("backend")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("awesome-cv.cls [unchanged]"))
		.stdout(predicates::str::contains("resume.pdf [removed]"))
		.stdout(predicates::str::contains("projects.tex [removed]"))
		.stdout(predicates::str::contains("experience.tex [removed]").not());

	assert!(tmp.path().join("build/resume.pdf").is_file());

	Ok(())
}

#[test]
fn build_dir_at_project_root_is_refused() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());
	std::fs::write(tmp.path().join("cvgen.toml"), "build_dir = \".\"\n")?;

	common::cvgen_cmd()
		.arg("--no-compile")
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("cvgen::unsafe_build_dir"));

	assert!(tmp.path().join("data.yaml").is_file());
	assert!(tmp.path().join("recipes.yaml").is_file());

	Ok(())
}

#[test]
fn diff_requires_dry_run() {
	common::cvgen_cmd()
		.arg("--diff")
		.arg("default")
		.assert()
		.failure()
		.stderr(predicates::str::contains("--dry-run"));
}

#[cfg(unix)]
#[test]
fn compiler_runs_in_build_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());
	std::fs::write(
		tmp.path().join("cvgen.toml"),
		"[compiler]\nprogram = \"sh\"\nargs = [\"-c\", \"test -f $0 && test -d resume\"]\n",
	)?;

	common::cvgen_cmd()
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Compiled resume.tex with sh."));

	Ok(())
}

#[cfg(unix)]
#[test]
fn compiler_failure_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());
	std::fs::write(
		tmp.path().join("cvgen.toml"),
		"[compiler]\nprogram = \"sh\"\nargs = [\"-c\", \"echo 'LaTeX Error: missing class'; exit 1\"]\n",
	)?;

	common::cvgen_cmd()
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("compiler `sh` failed with exit code 1"))
		.stderr(predicates::str::contains("LaTeX Error: missing class"));

	// Sources stay in place for inspection.
	assert!(tmp.path().join("build/resume.tex").is_file());

	Ok(())
}

#[test]
fn missing_compiler_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	init_project(tmp.path());
	std::fs::write(
		tmp.path().join("cvgen.toml"),
		"[compiler]\nprogram = \"cvgen-missing-compiler-for-tests\"\n",
	)?;

	common::cvgen_cmd()
		.arg("default")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("could not be started"));

	Ok(())
}
