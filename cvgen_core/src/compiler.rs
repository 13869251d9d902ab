use std::path::Path;
use std::process::Command;

use crate::CvgenError;
use crate::CvgenResult;
use crate::config::CompilerConfig;

/// Number of trailing output lines kept in a compiler failure report.
const FAILURE_OUTPUT_LINES: usize = 20;

/// Captured output of a successful compiler run.
#[derive(Debug, Clone)]
pub struct CompileOutput {
	pub program: String,
	pub stdout: String,
	pub stderr: String,
}

/// Run the compiler on `entry_point` with `build_dir` as the working
/// directory. A non-zero exit is an error carrying the exit status and the
/// tail of the compiler's output.
pub fn compile(
	build_dir: &Path,
	entry_point: &str,
	config: &CompilerConfig,
) -> CvgenResult<CompileOutput> {
	tracing::info!(program = %config.program, entry_point, "running compiler");

	let output = Command::new(&config.program)
		.args(&config.args)
		.arg(entry_point)
		.current_dir(build_dir)
		.output()
		.map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				CvgenError::CompilerNotFound {
					program: config.program.clone(),
					reason: e.to_string(),
				}
			} else {
				CvgenError::Io(e)
			}
		})?;

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();

	if !output.status.success() {
		let status = output
			.status
			.code()
			.map_or_else(|| "no exit code".to_string(), |code| format!("exit code {code}"));

		return Err(CvgenError::CompilerFailed {
			program: config.program.clone(),
			status,
			output: output_tail(&stdout, &stderr),
		});
	}

	tracing::info!(program = %config.program, "compiler finished");

	Ok(CompileOutput {
		program: config.program.clone(),
		stdout,
		stderr,
	})
}

/// The last lines of combined stdout and stderr.
fn output_tail(stdout: &str, stderr: &str) -> String {
	let lines: Vec<&str> = stdout
		.lines()
		.chain(stderr.lines())
		.filter(|line| !line.trim().is_empty())
		.collect();
	let start = lines.len().saturating_sub(FAILURE_OUTPUT_LINES);

	if lines.is_empty() {
		"(no output)".to_string()
	} else {
		lines[start..].join("\n")
	}
}
