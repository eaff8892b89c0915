//! Process launch seam for checker runs.
//!
//! [`SystemLauncher`] spawns the resolved checker with all three standard
//! streams piped. Tests substitute their own [`CheckerLauncher`] to observe
//! or forbid launches without touching the operating system.

use std::process::{Child, Command, Stdio};
use std::sync::Arc;

use tracing::debug;

use crate::command::ResolvedCommand;
use crate::error::CheckerError;

/// Tracing target for process launches.
const LAUNCH_TARGET: &str = "terrain_checker::launcher";

/// Starts checker processes.
///
/// Implementations must return a child whose stdin, stdout and stderr are
/// piped; the session writes the buffer to stdin and reads both outputs.
pub trait CheckerLauncher: Send + Sync {
    /// Spawns `command`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::SpawnFailed`] when the process cannot be
    /// started.
    fn launch(&self, command: &ResolvedCommand) -> Result<Child, CheckerError>;
}

/// Launches checkers as ordinary child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl CheckerLauncher for SystemLauncher {
    fn launch(&self, command: &ResolvedCommand) -> Result<Child, CheckerError> {
        debug!(
            target: LAUNCH_TARGET,
            executable = %command.executable().display(),
            args = ?command.args(),
            "spawning checker process"
        );
        Command::new(command.executable())
            .args(command.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| CheckerError::SpawnFailed {
                executable: command.executable().to_path_buf(),
                message: err.to_string(),
                source: Some(Arc::new(err)),
            })
    }
}
