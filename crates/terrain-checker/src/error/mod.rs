//! Domain errors raised by checker operations.
//!
//! These are configuration failures reported synchronously to the caller.
//! Problems the checker finds in the buffer, and non-zero checker exits, are
//! data and never surface here. I/O errors are wrapped in `Arc` to keep the
//! error `Clone` and small.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors arising from checker configuration and process launch.
#[derive(Debug, Clone, Error)]
pub enum CheckerError {
    /// The configured checker command line contains no program.
    #[error("checker command is empty")]
    EmptyCommand,

    /// The checker program could not be found on disk or on `PATH`.
    #[error("checker executable '{program}' not found")]
    ExecutableNotFound {
        /// Program name or path as configured.
        program: String,
    },

    /// The checker process could not be spawned.
    #[error("checker '{}' failed to start: {message}", executable.display())]
    SpawnFailed {
        /// Resolved executable path.
        executable: PathBuf,
        /// Human-readable failure description.
        message: String,
        /// Optional underlying I/O error.
        #[source]
        source: Option<Arc<std::io::Error>>,
    },
}

impl CheckerError {
    /// Creates a spawn failure without an underlying I/O error.
    #[must_use]
    pub fn spawn_failed(executable: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SpawnFailed {
            executable: executable.into(),
            message: message.into(),
            source: None,
        }
    }
}
