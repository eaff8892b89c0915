//! CLI argument definitions for the `terrain` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface for indenting, outlining and checking HCL files.
#[derive(Parser, Debug)]
#[command(name = "terrain", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The operation to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Operations on a single HCL file.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Prints the file re-indented by the configured rules.
    Indent {
        /// File to re-indent.
        file: PathBuf,
    },
    /// Prints the attributes and blocks defined in the file.
    Outline {
        /// File to outline.
        file: PathBuf,
        /// Emit JSON instead of an indented listing.
        #[arg(long)]
        json: bool,
    },
    /// Runs the configured checker over the file.
    Check {
        /// File to check.
        file: PathBuf,
        /// Emit JSON instead of `FILE:LINE: severity: message` lines.
        #[arg(long)]
        json: bool,
    },
}
