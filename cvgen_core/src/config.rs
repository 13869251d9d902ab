use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::CvgenError;
use crate::CvgenResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["cvgen.toml", ".cvgen.toml", ".config/cvgen.toml"];

/// Data files tried, in order, when `data` is not configured.
pub const DATA_FILE_CANDIDATES: [&str; 4] = ["data.yaml", "data.yml", "data.json", "data.toml"];

/// Recipe sources tried, in order, when `recipes` is not configured. The last
/// entry is a directory holding one document per recipe.
pub const RECIPES_CANDIDATES: [&str; 5] = [
	"recipes.yaml",
	"recipes.yml",
	"recipes.json",
	"recipes.toml",
	"recipes",
];

pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_STYLE_FILE: &str = "templates/awesome-cv.cls";
pub const DEFAULT_COMPILER: &str = "xelatex";

/// Configuration loaded from a `cvgen.toml` file. Every key is optional.
///
/// ```toml
/// data = "data.yaml"
/// recipes = "recipes.yaml"
/// build_dir = "build"
/// style = "templates/awesome-cv.cls"
///
/// [templates]
/// dir = "templates"
///
/// [markup]
/// line_break = " \\\\\n"
/// point_separator = "\n"
/// indent_steps = [1, 5, 9, 13]
///
/// [compiler]
/// program = "xelatex"
/// args = ["-interaction=nonstopmode", "-halt-on-error"]
/// ```
#[derive(Debug, Deserialize)]
pub struct CvgenConfig {
	/// Path to the data document, relative to the project root.
	#[serde(default)]
	pub data: Option<PathBuf>,
	/// Path to the recipes document or directory of recipe documents.
	#[serde(default)]
	pub recipes: Option<PathBuf>,
	/// Output directory. Deleted and recreated on every build.
	#[serde(default = "default_build_dir")]
	pub build_dir: PathBuf,
	/// Style file copied verbatim into the build directory. When unset,
	/// `templates/awesome-cv.cls` is copied if it exists.
	#[serde(default)]
	pub style: Option<PathBuf>,
	#[serde(default)]
	pub templates: TemplatesConfig,
	#[serde(default)]
	pub markup: MarkupConfig,
	#[serde(default)]
	pub compiler: CompilerConfig,
}

impl Default for CvgenConfig {
	fn default() -> Self {
		Self {
			data: None,
			recipes: None,
			build_dir: default_build_dir(),
			style: None,
			templates: TemplatesConfig::default(),
			markup: MarkupConfig::default(),
			compiler: CompilerConfig::default(),
		}
	}
}

/// Where template overrides are looked up.
#[derive(Debug, Default, Deserialize)]
pub struct TemplatesConfig {
	/// Directory holding `<template>.tex` overrides. Defaults to `templates`.
	#[serde(default)]
	pub dir: Option<PathBuf>,
}

/// Separators and indentation used between rendered markup units.
#[derive(Debug, Default, Deserialize)]
pub struct MarkupConfig {
	/// Placed between skill groups.
	#[serde(default)]
	pub line_break: Option<String>,
	/// Placed between rendered bullets.
	#[serde(default)]
	pub point_separator: Option<String>,
	/// Indent in millimetres for each nesting depth, starting at depth 1. The
	/// number of entries is the deepest supported nesting.
	#[serde(default)]
	pub indent_steps: Option<Vec<u32>>,
}

/// The external typesetting compiler.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CompilerConfig {
	#[serde(default = "default_compiler")]
	pub program: String,
	/// Arguments placed before the entry-point file name.
	#[serde(default = "default_compiler_args")]
	pub args: Vec<String>,
}

impl Default for CompilerConfig {
	fn default() -> Self {
		Self {
			program: default_compiler(),
			args: default_compiler_args(),
		}
	}
}

fn default_build_dir() -> PathBuf {
	PathBuf::from(DEFAULT_BUILD_DIR)
}

fn default_compiler() -> String {
	DEFAULT_COMPILER.to_string()
}

fn default_compiler_args() -> Vec<String> {
	vec![
		"-interaction=nonstopmode".to_string(),
		"-halt-on-error".to_string(),
	]
}

impl CvgenConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> CvgenResult<Option<CvgenConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: CvgenConfig =
			toml::from_str(&content).map_err(|e| CvgenError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	/// Absolute path of the data document.
	pub fn data_path(&self, root: &Path) -> CvgenResult<PathBuf> {
		resolve_input(root, self.data.as_deref(), &DATA_FILE_CANDIDATES, "data")
	}

	/// Absolute path of the recipes document or directory.
	pub fn recipes_path(&self, root: &Path) -> CvgenResult<PathBuf> {
		resolve_input(root, self.recipes.as_deref(), &RECIPES_CANDIDATES, "recipes")
	}

	pub fn build_dir(&self, root: &Path) -> PathBuf {
		root.join(&self.build_dir)
	}

	/// The templates directory, if it exists.
	pub fn templates_dir(&self, root: &Path) -> Option<PathBuf> {
		let dir = root.join(
			self.templates
				.dir
				.as_deref()
				.unwrap_or_else(|| Path::new(DEFAULT_TEMPLATES_DIR)),
		);
		dir.is_dir().then_some(dir)
	}

	/// The style file to copy into the build directory. An explicitly
	/// configured style must exist; the default one is skipped when absent.
	pub fn style_path(&self, root: &Path) -> CvgenResult<Option<PathBuf>> {
		if let Some(style) = &self.style {
			let path = root.join(style);
			if !path.is_file() {
				return Err(CvgenError::StyleFile {
					path: style.display().to_string(),
					reason: "is configured but does not exist".to_string(),
				});
			}
			return Ok(Some(path));
		}

		let path = root.join(DEFAULT_STYLE_FILE);
		if path.is_file() {
			Ok(Some(path))
		} else {
			tracing::warn!(
				path = %path.display(),
				"no style file found, the build directory will not contain one"
			);
			Ok(None)
		}
	}
}

fn resolve_input(
	root: &Path,
	configured: Option<&Path>,
	candidates: &[&str],
	label: &str,
) -> CvgenResult<PathBuf> {
	if let Some(configured) = configured {
		return Ok(root.join(configured));
	}

	candidates
		.iter()
		.map(|candidate| root.join(candidate))
		.find(|path| path.exists())
		.ok_or_else(|| {
			CvgenError::DataFile {
				path: root.join(candidates[0]).display().to_string(),
				reason: format!(
					"no {label} source found (looked for {})",
					candidates.join(", ")
				),
			}
		})
}
