//! Layered configuration for the Terrain command line tool.
//!
//! Values are merged from built-in defaults, a TOML configuration file
//! (`--config-path` or `TERRAIN_CONFIG_PATH`), `TERRAIN_*` environment
//! variables and command line flags, in increasing order of precedence.
//! The heavy lifting is done by [`ortho_config`].

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_CHECKER_COMMAND, DEFAULT_INDENT_WIDTH, DEFAULT_LOG_FILTER,
    default_checker_command_string, default_indent_width, default_log_filter,
    default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Widest indentation step accepted from configuration.
pub const MAX_INDENT_WIDTH: u16 = 16;

/// Resolved settings shared by every `terrain` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "TERRAIN")]
pub struct Config {
    /// `tracing` filter directive, e.g. `info` or `terrain_checker=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for diagnostics logs.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Columns per indentation level.
    #[serde(default = "default_indent_width")]
    #[ortho_config(default = default_indent_width())]
    pub indent_width: u16,
    /// Checker command line; the buffer is written to its stdin.
    #[serde(default = "default_checker_command_string")]
    #[ortho_config(default = default_checker_command_string())]
    pub checker_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            indent_width: default_indent_width(),
            checker_command: default_checker_command_string(),
        }
    }
}

impl Config {
    /// Returns the configured log filter.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the configured indentation width.
    #[must_use]
    pub const fn indent_width(&self) -> u16 {
        self.indent_width
    }

    /// Returns the configured checker command line.
    #[must_use]
    pub fn checker_command(&self) -> &str {
        &self.checker_command
    }

    /// Rejects settings that load cleanly but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndentWidth`] when the width is zero or wider
    /// than [`MAX_INDENT_WIDTH`], and [`ConfigError::EmptyCheckerCommand`]
    /// when the checker command line is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_INDENT_WIDTH).contains(&self.indent_width) {
            return Err(ConfigError::IndentWidth {
                width: self.indent_width,
            });
        }
        if self.checker_command.trim().is_empty() {
            return Err(ConfigError::EmptyCheckerCommand);
        }
        Ok(())
    }
}

/// Settings that parsed but are out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The indentation width is unusable.
    #[error("indent width {width} is outside 1..={max}", max = MAX_INDENT_WIDTH)]
    IndentWidth {
        /// Configured width.
        width: u16,
    },
    /// The checker command line has no program.
    #[error("checker command is empty")]
    EmptyCheckerCommand,
}
