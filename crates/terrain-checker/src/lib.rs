//! Background syntax checking for HCL (Terraform) buffers.
//!
//! A [`CheckerSession`] pipes a snapshot of the buffer into an external
//! checker (by default `terraform fmt -no-color -`), collects everything the
//! process prints, and turns the Terraform-style diagnostic blocks it finds
//! into [`Diagnostic`]s positioned on whole lines of that snapshot.
//!
//! Only the newest check reports. Starting another check, cancelling, or
//! dropping the session kills the process in flight and throws its output
//! away, so stale diagnostics never reach an edited buffer.
//!
//! ```no_run
//! use terrain_checker::{CheckerCommand, CheckerSession};
//!
//! let session = CheckerSession::new(CheckerCommand::default());
//! session.run_check("variable \"region\" {\n", |report| {
//!     for diagnostic in report.diagnostics {
//!         eprintln!("{}: {}", diagnostic.line, diagnostic.message);
//!     }
//! })?;
//! # Ok::<(), terrain_checker::CheckerError>(())
//! ```
//!
//! The output parser is usable on its own through [`parse_output`].

mod command;
mod diagnostic;
mod error;
mod launcher;
mod output;
mod session;

pub use command::{CheckerCommand, DEFAULT_CHECKER_COMMAND, ResolvedCommand};
pub use diagnostic::{Diagnostic, diagnostics_for};
pub use error::CheckerError;
pub use launcher::{CheckerLauncher, SystemLauncher};
pub use output::{CheckerProblem, Problems, Severity, parse_output};
pub use session::{CheckHandle, CheckReport, CheckerSession};

#[cfg(test)]
mod tests;
