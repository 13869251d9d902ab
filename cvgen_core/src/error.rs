use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum CvgenError {
	#[error(transparent)]
	#[diagnostic(code(cvgen::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(cvgen::config_parse),
		help("check that cvgen.toml is valid TOML; every key is optional")
	)]
	ConfigParse(String),

	#[error("failed to load data file `{path}`: {reason}")]
	#[diagnostic(code(cvgen::data_file))]
	DataFile { path: String, reason: String },

	#[error("failed to read template override `{path}`: {reason}")]
	#[diagnostic(
		code(cvgen::template_file),
		help("template overrides must be readable UTF-8 text files")
	)]
	TemplateFile { path: String, reason: String },

	#[error("style file `{path}` {reason}")]
	#[diagnostic(
		code(cvgen::style_file),
		help("fix or remove the `style` entry in cvgen.toml")
	)]
	StyleFile { path: String, reason: String },

	#[error("build directory `{build_dir}` would delete project input `{input}`")]
	#[diagnostic(
		code(cvgen::unsafe_build_dir),
		help("point `build_dir` in cvgen.toml at a dedicated directory such as `build`")
	)]
	UnsafeBuildDir { build_dir: String, input: String },

	#[error("unsupported data file format: `{0}`")]
	#[diagnostic(
		code(cvgen::unsupported_format),
		help("supported formats: json, toml, yaml, yml")
	)]
	UnsupportedDataFormat(String),

	#[error("recipe `{name}` not found")]
	#[diagnostic(
		code(cvgen::recipe_not_found),
		help("available recipes: {available}")
	)]
	RecipeNotFound { name: String, available: String },

	#[error("{kind} `{name}` is referenced by the recipe but missing from the data file")]
	#[diagnostic(
		code(cvgen::missing_entity),
		help("add `{name}` under `{kind}` in the data file or remove it from the recipe")
	)]
	MissingEntity { kind: String, name: String },

	#[error("{kind} `{name}` has no field `{field}`")]
	#[diagnostic(
		code(cvgen::missing_field),
		help("check the `title_key` for `{name}` in the recipe")
	)]
	MissingField {
		kind: String,
		name: String,
		field: String,
	},

	#[error("point `{key}` is nested {depth} level(s) deep (limit: {max})")]
	#[diagnostic(
		code(cvgen::indent_too_deep),
		help("flatten the point or add more entries to `markup.indent_steps`")
	)]
	IndentTooDeep { key: String, depth: usize, max: usize },

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(cvgen::template_render))]
	TemplateRender(String),

	#[error("compiler `{program}` could not be started: {reason}")]
	#[diagnostic(
		code(cvgen::compiler_not_found),
		help("install `{program}`, set `compiler.program` in cvgen.toml, or pass --no-compile")
	)]
	CompilerNotFound { program: String, reason: String },

	#[error("compiler `{program}` failed with {status}")]
	#[diagnostic(
		code(cvgen::compiler_failed),
		help("compiler output (last lines):\n{output}")
	)]
	CompilerFailed {
		program: String,
		status: String,
		output: String,
	},
}

pub type CvgenResult<T> = Result<T, CvgenError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
