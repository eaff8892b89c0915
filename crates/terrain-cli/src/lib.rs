//! Command-line runtime for the Terrain HCL editing tools.
//!
//! The module owns argument parsing, configuration bootstrapping, and the
//! three file commands: `indent`, `outline` and `check`. It is exercised
//! both from the binary entrypoint and from tests, where configuration
//! loading and the output streams are substituted.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser as _;
use terrain_checker::{CheckerCommand, CheckerSession, Severity};
use terrain_config::Config;
use terrain_syntax::{Indenter, NameResolver, Parser, SyntaxTree};
use tracing::debug;

mod cli;
mod config;
mod errors;
mod render;
mod telemetry;

use cli::{Cli, CliCommand};
use config::{command_arguments, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;

/// Tracing target for command execution.
const CLI_TARGET: &str = "terrain_cli";

/// Bundles the output streams handed to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

struct CliRunner<'a, 'io, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, W, E>,
    loader: &'a L,
}

impl<W, E, L> CliRunner<'_, '_, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let arguments: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&arguments);

        let cli = match Cli::try_parse_from(command_arguments(&arguments, &split)) {
            Ok(cli) => cli,
            Err(error) if !error.use_stderr() => {
                return match write!(self.io.stdout, "{error}") {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(_) => ExitCode::FAILURE,
                };
            }
            Err(error) => return self.fail(&AppError::CliUsage(error)),
        };

        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|loaded| {
                telemetry::initialise(&loaded)?;
                Ok(loaded)
            })
            .and_then(|loaded| execute(&cli.command, &loaded, self.io));

        match result {
            Ok(exit_code) => exit_code,
            Err(error) => self.fail(&error),
        }
    }

    fn fail(&mut self, error: &AppError) -> ExitCode {
        if writeln!(self.io.stderr, "{error}").is_err() {
            debug!(target: CLI_TARGET, %error, "failed to report error");
        }
        ExitCode::FAILURE
    }
}

/// Runs the CLI using the provided arguments and output streams.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams { stdout, stderr };
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner { io, loader }.run(args)
}

fn execute<W, E>(
    command: &CliCommand,
    config: &Config,
    io: &mut IoStreams<'_, W, E>,
) -> Result<ExitCode, AppError>
where
    W: Write,
    E: Write,
{
    match command {
        CliCommand::Indent { file } => {
            let tree = parse_file(file)?;
            let indented = Indenter::hcl(config.indent_width()).reindent(&tree);
            io.stdout.write_all(indented.as_bytes())?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Outline { file, json } => {
            let tree = parse_file(file)?;
            let outline = NameResolver::new().outline(&tree);
            if *json {
                render::write_json(&mut *io.stdout, &outline)?;
            } else {
                render::write_outline(&mut *io.stdout, &outline)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Check { file, json } => check_file(file, *json, config, io),
    }
}

fn read_file(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_file(path: &Path) -> Result<SyntaxTree, AppError> {
    let source = read_file(path)?;
    let parse_error = |source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let mut parser = Parser::new().map_err(parse_error)?;
    let parsed = parser.parse(&source).map_err(parse_error)?;
    if parsed.has_errors() {
        debug!(
            target: CLI_TARGET,
            path = %path.display(),
            errors = parsed.errors().len(),
            "file has syntax errors"
        );
    }
    Ok(parsed.syntax_tree())
}

/// Runs the checker and exits non-zero when it reports an error.
fn check_file<W, E>(
    path: &Path,
    json: bool,
    config: &Config,
    io: &mut IoStreams<'_, W, E>,
) -> Result<ExitCode, AppError>
where
    W: Write,
    E: Write,
{
    let buffer = read_file(path)?;
    let session = CheckerSession::new(CheckerCommand::parse(config.checker_command())?);
    let report = session
        .check(&buffer)?
        .ok_or_else(|| AppError::CheckAbandoned {
            path: path.to_path_buf(),
        })?;
    debug!(
        target: CLI_TARGET,
        path = %path.display(),
        diagnostics = report.diagnostics.len(),
        exit_code = ?report.exit_code,
        "check complete"
    );

    if json {
        render::write_json(&mut *io.stdout, &report.diagnostics)?;
    } else {
        render::write_diagnostics(&mut *io.stdout, path, &report.diagnostics)?;
    }

    let failed = report
        .diagnostics
        .iter()
        .any(|diagnostic| diagnostic.severity == Severity::Error);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests;
