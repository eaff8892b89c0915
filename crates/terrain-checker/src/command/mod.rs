//! Checker command lines and executable resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CheckerError;

/// Tracing target for command resolution.
const COMMAND_TARGET: &str = "terrain_checker::command";

/// Command line used when none is configured: Terraform's formatter reading
/// the buffer from stdin.
pub const DEFAULT_CHECKER_COMMAND: &str = "terraform fmt -no-color -";

/// A checker program and its fixed argument list.
///
/// The buffer is always delivered on stdin, so the arguments never change
/// between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerCommand {
    program: String,
    args: Vec<String>,
}

impl Default for CheckerCommand {
    fn default() -> Self {
        Self::new("terraform", ["fmt", "-no-color", "-"])
    }
}

impl fmt::Display for CheckerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl CheckerCommand {
    /// Creates a command from a program and its arguments.
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a command line on whitespace.
    ///
    /// Quoting is not interpreted; the first word is the program.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::EmptyCommand`] when the line has no words.
    pub fn parse(line: &str) -> Result<Self, CheckerError> {
        let mut words = line.split_whitespace();
        let program = words.next().ok_or(CheckerError::EmptyCommand)?;
        Ok(Self::new(program, words))
    }

    /// Returns the program name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the argument list.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Locates the program on disk.
    ///
    /// Paths are checked directly; bare names are looked up on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::ExecutableNotFound`] when no executable file
    /// matches.
    pub fn resolve(&self) -> Result<ResolvedCommand, CheckerError> {
        let executable =
            which::which(&self.program).map_err(|_| CheckerError::ExecutableNotFound {
                program: self.program.clone(),
            })?;
        debug!(
            target: COMMAND_TARGET,
            program = %self.program,
            executable = %executable.display(),
            "resolved checker executable"
        );
        Ok(ResolvedCommand {
            executable,
            args: self.args.clone(),
        })
    }
}

/// A checker command whose executable has been located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    executable: PathBuf,
    args: Vec<String>,
}

impl ResolvedCommand {
    /// Returns the absolute path of the executable.
    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Returns the argument list.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}
