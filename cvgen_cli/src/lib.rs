use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate tailored LaTeX resumes from one data file and named recipes.",
	long_about = "cvgen keeps every summary, skill, project, job and education record in a single \
	              data file and builds a resume for each recipe, a named selection of those \
	              entries.\n\nQuick start:\n  cvgen init               Create a sample \
	              project\n  cvgen list               Show the available recipes\n  cvgen \
	              default            Build the `default` recipe into build/\n  cvgen --no-compile \
	              web   Write the LaTeX sources without running the compiler"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct CvgenCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Name of the recipe to build.
	pub recipe: Option<String>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output and debug logging.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Write the build directory but skip the external compiler.
	#[arg(long, default_value_t = false)]
	pub no_compile: bool,

	/// Render the recipe without touching the build directory. Prints the
	/// files that would be written.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// With `--dry-run`, show a unified diff against the current contents of
	/// the build directory.
	#[arg(long, default_value_t = false, requires = "dry_run")]
	pub diff: bool,

	/// Rebuild whenever the data, recipes, config or templates change.
	#[arg(long, default_value_t = false, conflicts_with = "dry_run")]
	pub watch: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample project in the project root.
	///
	/// Writes `cvgen.toml`, `data.yaml`, `recipes.yaml` and the document
	/// templates under `templates/`. Existing files are left untouched.
	Init,
	/// List the recipes defined by the project.
	///
	/// Shows each recipe with the sections it would produce, in document
	/// order.
	List {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
