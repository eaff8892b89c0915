//! Buffer diagnostics built from checker problems.

use std::ops::Range;

use serde::Serialize;
use terrain_syntax::LineIndex;

use crate::output::{CheckerProblem, Severity};

/// A checker problem mapped onto the buffer that was checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// One-based line the diagnostic covers, after clamping to the buffer.
    pub line: usize,
    /// Byte span of that line, excluding its terminator.
    pub range: Range<usize>,
    /// Problem severity.
    pub severity: Severity,
    /// Short description from the problem header.
    pub summary: String,
    /// Full explanatory message.
    pub message: String,
}

impl Diagnostic {
    /// Maps `problem` onto the buffer indexed by `lines`.
    ///
    /// The diagnostic spans the whole of the reported line. Lines past the
    /// end of the buffer clamp to its last line, and line `0` to the first.
    #[must_use]
    pub fn from_problem(problem: &CheckerProblem, lines: &LineIndex) -> Self {
        let line = problem.line.clamp(1, lines.line_count());
        Self {
            line,
            range: lines.clamped_line_range(line),
            severity: problem.severity,
            summary: problem.summary.clone(),
            message: problem.message.clone(),
        }
    }
}

/// Parses checker output and maps every problem onto `buffer`.
#[must_use]
pub fn diagnostics_for(output: &str, buffer: &str) -> Vec<Diagnostic> {
    let lines = LineIndex::new(buffer);
    crate::output::parse_output(output)
        .map(|problem| Diagnostic::from_problem(&problem, &lines))
        .collect()
}
