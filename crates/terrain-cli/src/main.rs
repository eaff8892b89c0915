//! CLI entrypoint for the Terrain HCL editing tool.
//!
//! The binary delegates to [`terrain_cli::run`], which loads configuration,
//! parses the subcommand, and writes results to the locked standard streams.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    terrain_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
