mod common;

use clap::Parser;
use cvgen_cli::Commands;
use cvgen_cli::CvgenCli;
use cvgen_cli::OutputFormat;
use cvgen_core::AnyEmptyResult;
use rstest::rstest;
use serde_json::Value;
use similar_asserts::assert_eq;

#[test]
fn list_prints_recipes_and_sections() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::cvgen_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let output = common::cvgen_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();
	let stdout = String::from_utf8(output)?;

	assert_eq!(
		stdout,
		"Recipes:\n  backend (summary, skills, experience)\n  default (summary, skills, projects, \
		 experience, education)\n\n2 recipe(s)\n"
	);

	Ok(())
}

#[test]
fn list_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("data.json"), "{}")?;
	std::fs::create_dir_all(tmp.path().join("recipes"))?;
	std::fs::write(tmp.path().join("recipes/web.toml"), "summary = \"web\"\n")?;
	std::fs::write(tmp.path().join("recipes/empty.yaml"), "{}\n")?;

	let output = common::cvgen_cmd()
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let recipes: Value = serde_json::from_slice(&output)?;
	insta::assert_snapshot!(
		recipes.to_string(),
		@r#"[{"name":"empty","sections":[]},{"name":"web","sections":["summary"]}]"#
	);

	Ok(())
}

#[rstest]
#[case::text(&["cvgen", "list"], OutputFormat::Text)]
#[case::json(&["cvgen", "list", "--format", "json"], OutputFormat::Json)]
fn list_format_parses(#[case] argv: &[&str], #[case] expected: OutputFormat) {
	let cli = CvgenCli::parse_from(argv.iter().copied());
	match cli.command {
		Some(Commands::List { format }) => {
			assert_eq!(format, expected);
		}
		_ => panic!("expected List command"),
	}
}

#[test]
fn recipe_and_flags_parse() {
	let cli = CvgenCli::parse_from(["cvgen", "--no-compile", "--dry-run", "--diff", "web"]);
	assert!(cli.command.is_none());
	assert_eq!(cli.recipe.as_deref(), Some("web"));
	assert!(cli.no_compile);
	assert!(cli.dry_run);
	assert!(cli.diff);
	assert!(!cli.watch);
}
