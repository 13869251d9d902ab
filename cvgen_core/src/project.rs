use std::path::Path;
use std::path::PathBuf;

use crate::CvgenError;
use crate::CvgenResult;
use crate::assembler;
use crate::assembler::Document;
use crate::compiler;
use crate::compiler::CompileOutput;
use crate::config::CvgenConfig;
use crate::data::DataStore;
use crate::recipe::Recipes;
use crate::templates::TemplateSet;

/// A project root together with everything loaded from it, ready to build
/// any of its recipes.
#[derive(Debug)]
pub struct ProjectContext {
	pub root: PathBuf,
	/// Path of the discovered config file, if any.
	pub config_path: Option<PathBuf>,
	pub config: CvgenConfig,
	pub data_path: PathBuf,
	pub recipes_path: PathBuf,
	pub data: DataStore,
	pub recipes: Recipes,
	pub templates: TemplateSet,
}

/// Options for a single build.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
	/// Run the external compiler after writing the build directory.
	pub compile: bool,
}

impl Default for BuildOptions {
	fn default() -> Self {
		Self { compile: true }
	}
}

/// What a build wrote and ran.
#[derive(Debug)]
pub struct BuildReport {
	pub recipe: String,
	pub build_dir: PathBuf,
	pub written: Vec<PathBuf>,
	pub document: Document,
	/// `None` when compilation was skipped.
	pub compile: Option<CompileOutput>,
}

/// Load config, data, recipes and templates for the project at `root`.
/// Nothing is written.
pub fn load_project(root: &Path) -> CvgenResult<ProjectContext> {
	let config_path = CvgenConfig::resolve_path(root);
	let config = CvgenConfig::load(root)?.unwrap_or_default();

	let data_path = config.data_path(root)?;
	let recipes_path = config.recipes_path(root)?;
	let data = DataStore::load(&data_path)?;
	let recipes = Recipes::load(&recipes_path)?;
	let templates = TemplateSet::load(config.templates_dir(root).as_deref(), &config.markup)?;

	Ok(ProjectContext {
		root: root.to_path_buf(),
		config_path,
		config,
		data_path,
		recipes_path,
		data,
		recipes,
		templates,
	})
}

impl ProjectContext {
	pub fn build_dir(&self) -> PathBuf {
		self.config.build_dir(&self.root)
	}

	/// Render the named recipe in memory.
	pub fn render(&self, recipe_name: &str) -> CvgenResult<Document> {
		let recipe = self.recipes.get(recipe_name)?;
		assembler::assemble(recipe, &self.data, &self.templates)
	}

	/// Render the named recipe, recreate the build directory, write the
	/// document and optionally compile it. The build directory is only
	/// touched once the whole document rendered successfully.
	pub fn build(&self, recipe_name: &str, options: BuildOptions) -> CvgenResult<BuildReport> {
		let document = self.render(recipe_name)?;
		let style = self.config.style_path(&self.root)?;
		let build_dir = self.build_dir();
		self.check_build_dir(&build_dir, style.as_deref())?;

		tracing::info!(recipe = recipe_name, path = %build_dir.display(), "building recipe");
		let written = assembler::write_document(&document, &build_dir, style.as_deref())?;

		let compile = if options.compile {
			Some(compiler::compile(
				&build_dir,
				assembler::ENTRY_POINT,
				&self.config.compiler,
			)?)
		} else {
			tracing::debug!("skipping compiler");
			None
		};

		Ok(BuildReport {
			recipe: recipe_name.to_string(),
			build_dir,
			written,
			document,
			compile,
		})
	}

	/// Refuse a build directory whose removal would take the project root or
	/// any input with it. A directory that does not exist yet is never
	/// removed, so it always passes.
	pub fn check_build_dir(&self, build_dir: &Path, style: Option<&Path>) -> CvgenResult<()> {
		if !build_dir.exists() {
			return Ok(());
		}

		let canonical_build_dir = std::fs::canonicalize(build_dir)?;
		let mut inputs = vec![self.root.clone()];
		inputs.extend(self.watch_paths());
		inputs.extend(style.map(Path::to_path_buf));

		for input in inputs.iter().filter(|input| input.exists()) {
			if std::fs::canonicalize(input)?.starts_with(&canonical_build_dir) {
				return Err(CvgenError::UnsafeBuildDir {
					build_dir: build_dir.display().to_string(),
					input: input.display().to_string(),
				});
			}
		}

		Ok(())
	}

	/// Input files and directories whose changes should trigger a rebuild.
	pub fn watch_paths(&self) -> Vec<PathBuf> {
		let mut paths = vec![self.data_path.clone(), self.recipes_path.clone()];
		if let Some(config_path) = &self.config_path {
			paths.push(config_path.clone());
		}
		if let Some(dir) = self.config.templates_dir(&self.root) {
			paths.push(dir);
		}
		paths
	}
}
