use std::path::Path;
use std::path::PathBuf;

use crate::CvgenResult;
use crate::config::DEFAULT_TEMPLATES_DIR;
use crate::templates::TemplateName;

pub const SAMPLE_CONFIG: &str = r#"# cvgen configuration. Every key is optional; defaults are shown.
# data = "data.yaml"
# recipes = "recipes.yaml"
# build_dir = "build"
# style = "templates/awesome-cv.cls"

# [templates]
# dir = "templates"

# [markup]
# point_separator = "\n"
# indent_steps = [1, 5, 9, 13]

# [compiler]
# program = "xelatex"
# args = ["-interaction=nonstopmode", "-halt-on-error"]
"#;

pub const SAMPLE_DATA: &str = r"summaries:
  general: Software engineer who enjoys building small, sharp tools.
  backend: Backend engineer focused on reliable data pipelines.

skills:
  rust: Rust
  python: Python
  sql: SQL
  git: Git
  docker: Docker
  linux: Linux

projects:
  cvgen:
    name: cvgen
    href: https://github.com/ifiokjr/cvgen
    link: github.com/ifiokjr/cvgen
    date: 2024
    tech: Rust, LaTeX
    points:
      render: Renders resumes from structured data and per-job recipes
      filters: Supports include and exclude lists on every bullet
      details:
        order: Keeps bullet order exactly as written
        nesting: Indents nested bullets up to four levels

experience:
  acme:
    name: Software Engineer
    short_title: Engineer
    employer: Acme Corp
    date: 2021 -- Present
    points:
      pipeline: Built the ingestion pipeline for partner data feeds
      oncall: Led the on-call rotation for the data platform team
      tooling:
        cli: Wrote internal command line tools used across the company
        ci: Cut CI times in half by caching build artifacts

education:
  university:
    degree: B.Sc. Computer Science
    institution: Example University
    location: Lagos, Nigeria
    date: 2016 -- 2020
    notation: standard
    points:
      honours: First class honours
      thesis: Thesis on incremental parsing
";

pub const SAMPLE_RECIPES: &str = r"default:
  summary: general
  skills:
    - name: Languages
      content: [rust, python, sql]
    - name: Tools
      content: [git, docker, linux]
  projects:
    - cvgen
  experience:
    - name: acme
      exclude: [oncall]
  education:
    - university

backend:
  summary: backend
  skills:
    - name: Languages
      content: [rust, sql]
  experience:
    - name: acme
      title_key: short_title
      include: [pipeline, tooling, cli, ci]
";

/// A file considered by [`scaffold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldEntry {
	pub path: PathBuf,
	/// `false` when the file already existed and was left untouched.
	pub created: bool,
}

/// Write a sample config, data file, recipes file and the document templates
/// into `root`. Existing files are never overwritten.
pub fn scaffold(root: &Path) -> CvgenResult<Vec<ScaffoldEntry>> {
	let templates_dir = Path::new(DEFAULT_TEMPLATES_DIR);
	let mut files: Vec<(PathBuf, &str)> = vec![
		(PathBuf::from("cvgen.toml"), SAMPLE_CONFIG),
		(PathBuf::from("data.yaml"), SAMPLE_DATA),
		(PathBuf::from("recipes.yaml"), SAMPLE_RECIPES),
	];
	files.extend(
		TemplateName::DOCUMENT
			.iter()
			.map(|name| (templates_dir.join(name.file_name()), name.builtin_source())),
	);

	let mut entries = Vec::with_capacity(files.len());
	for (relative, content) in files {
		let path = root.join(relative);
		if path.exists() {
			entries.push(ScaffoldEntry {
				path,
				created: false,
			});
			continue;
		}

		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, content)?;
		entries.push(ScaffoldEntry {
			path,
			created: true,
		});
	}

	Ok(entries)
}
