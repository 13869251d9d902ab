use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use clap::CommandFactory;
use clap::Parser;
use cvgen_cli::Commands;
use cvgen_cli::CvgenCli;
use cvgen_cli::OutputFormat;
use cvgen_core::AnyEmptyResult;
use cvgen_core::assembler::ENTRY_POINT;
use cvgen_core::project::BuildOptions;
use cvgen_core::project::ProjectContext;
use cvgen_core::project::load_project;
use cvgen_core::scaffold::scaffold;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = CvgenCli::parse();

	// Respect NO_COLOR, --no-color and terminals without color support.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose);

	let result = match (&args.command, &args.recipe) {
		(Some(Commands::Init), _) => run_init(&args),
		(Some(Commands::List { format }), _) => run_list(&args, *format),
		(None, Some(recipe)) => run_build(&args, recipe),
		(None, None) => {
			if let Err(e) = CvgenCli::command().print_help() {
				eprintln!("{} {e}", colored!("error:", red));
				process::exit(1);
			}
			return;
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<cvgen_core::CvgenError>() {
			Ok(cvgen_err) => {
				let report: miette::Report = (*cvgen_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
	let default_filter = if verbose { "debug" } else { "warn" };
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| default_filter.into()),
		)
		.with_writer(std::io::stderr)
		.with_ansi(color_enabled())
		.with_target(false)
		.init();
}

fn resolve_root(args: &CvgenCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_init(args: &CvgenCli) -> AnyEmptyResult {
	let root = resolve_root(args);
	std::fs::create_dir_all(&root)?;
	let entries = scaffold(&root)?;

	for entry in &entries {
		let rel = make_relative(&entry.path, &root);
		if entry.created {
			println!("Created {rel}");
		} else {
			println!("Skipped {rel} (already exists)");
		}
	}

	if entries.iter().any(|entry| entry.created) {
		println!();
		println!("Next steps:");
		println!("  1. Describe your experience in data.yaml");
		println!("  2. Pick what each resume shows in recipes.yaml");
		println!("  3. Copy awesome-cv.cls into templates/");
		println!("  4. Run `cvgen default` to build the default recipe");
	}

	Ok(())
}

#[derive(Serialize)]
struct RecipeSummary<'a> {
	name: &'a str,
	sections: Vec<&'static str>,
}

fn run_list(args: &CvgenCli, format: OutputFormat) -> AnyEmptyResult {
	let root = resolve_root(args);
	let ctx = load_project(&root)?;

	let summaries: Vec<RecipeSummary<'_>> = ctx
		.recipes
		.iter()
		.map(|(name, recipe)| {
			RecipeSummary {
				name: name.as_str(),
				sections: recipe
					.active_sections()
					.into_iter()
					.map(|kind| kind.key())
					.collect(),
			}
		})
		.collect();

	if matches!(format, OutputFormat::Json) {
		println!("{}", serde_json::to_string_pretty(&summaries)?);
		return Ok(());
	}

	if summaries.is_empty() {
		println!(
			"No recipes found in {}.",
			make_relative(&ctx.recipes_path, &root)
		);
		return Ok(());
	}

	println!("{}", colored!("Recipes:", bold));
	for summary in &summaries {
		let sections = if summary.sections.is_empty() {
			"no sections".to_string()
		} else {
			summary.sections.join(", ")
		};
		println!("  {} ({sections})", summary.name);
	}
	println!("\n{} recipe(s)", summaries.len());

	Ok(())
}

fn run_build(args: &CvgenCli, recipe: &str) -> AnyEmptyResult {
	// Run the initial build.
	run_build_once(args, recipe)?;

	if !args.watch {
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let root = std::fs::canonicalize(resolve_root(args))?;
	let watched = load_project(&root)?.watch_paths();
	tracing::debug!(paths = ?watched, "watching inputs");
	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				// Writes to the build directory fall outside the watched inputs.
				if matches!(
					event.kind,
					notify::EventKind::Modify(_)
						| notify::EventKind::Create(_)
						| notify::EventKind::Remove(_)
				) && event
					.paths
					.iter()
					.any(|path| watched.iter().any(|input| path.starts_with(input)))
				{
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, rebuilding...");
		if let Err(e) = run_build_once(args, recipe) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

fn run_build_once(args: &CvgenCli, recipe: &str) -> AnyEmptyResult {
	let root = resolve_root(args);
	tracing::debug!(root = %root.display(), "loading project");
	let ctx = load_project(&root)?;

	if args.dry_run {
		return run_dry_run(&ctx, recipe, args.diff);
	}

	let report = ctx.build(
		recipe,
		BuildOptions {
			compile: !args.no_compile,
		},
	)?;

	println!(
		"{} recipe `{}` into {}",
		colored!("Built", green),
		report.recipe,
		make_relative(&report.build_dir, &root)
	);

	if args.verbose {
		for path in &report.written {
			println!("  {}", make_relative(path, &root));
		}
	}

	match &report.compile {
		Some(output) => {
			println!("Compiled {ENTRY_POINT} with {}.", output.program);
			if args.verbose && !output.stdout.trim().is_empty() {
				println!("{}", output.stdout.trim_end());
			}
		}
		None => {
			println!(
				"{} compilation skipped (--no-compile).",
				colored!("note:", yellow)
			);
		}
	}

	Ok(())
}

/// Render the recipe and report what a build would change, without writing.
/// Files the build would delete are listed as removed.
fn run_dry_run(ctx: &ProjectContext, recipe: &str, show_diff: bool) -> AnyEmptyResult {
	let document = ctx.render(recipe)?;
	let style = ctx.config.style_path(&ctx.root)?;
	let build_dir = ctx.build_dir();
	ctx.check_build_dir(&build_dir, style.as_deref())?;

	let mut planned: Vec<(PathBuf, Vec<u8>)> = Vec::new();
	if let Some(style) = &style {
		if let Some(file_name) = style.file_name() {
			planned.push((PathBuf::from(file_name), std::fs::read(style)?));
		}
	}
	planned.extend(
		document
			.files()
			.into_iter()
			.map(|(relative, content)| (relative, content.as_bytes().to_vec())),
	);

	println!(
		"Dry run: would write {} file(s) to {}:",
		planned.len(),
		make_relative(&build_dir, &ctx.root)
	);

	for (relative, content) in &planned {
		let current = std::fs::read(build_dir.join(relative)).ok();
		let status = match current.as_deref() {
			None => "new",
			Some(existing) if existing == content.as_slice() => "unchanged",
			Some(_) => "changed",
		};
		println!("  {} [{status}]", relative.display());

		if show_diff && status != "unchanged" {
			print_diff(
				&String::from_utf8_lossy(current.as_deref().unwrap_or_default()),
				&String::from_utf8_lossy(content),
			);
		}
	}

	let mut existing = Vec::new();
	collect_files(&build_dir, &build_dir, &mut existing)?;
	existing.sort();
	for relative in existing
		.iter()
		.filter(|relative| !planned.iter().any(|(path, _)| path == *relative))
	{
		println!("  {} [{}]", relative.display(), colored!("removed", red));
	}

	Ok(())
}

/// Collect every file under `dir`, relative to `base`. A missing directory
/// holds no files.
fn collect_files(dir: &Path, base: &Path, files: &mut Vec<PathBuf>) -> AnyEmptyResult {
	if !dir.is_dir() {
		return Ok(());
	}

	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_dir() {
			collect_files(&path, base, files)?;
		} else if let Ok(relative) = path.strip_prefix(base) {
			files.push(relative.to_path_buf());
		}
	}

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
