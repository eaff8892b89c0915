//! Parser for the checker's plain-text diagnostics.
//!
//! Terraform renders each diagnostic as a block:
//!
//! ```text
//! Error: Unsupported argument
//!
//!   on <stdin> line 7, in resource "aws_instance" "web":
//!    7:   foo = "bar"
//!
//! An argument named "foo" is not expected here.
//! ```
//!
//! Interactive renderings draw a frame (`╷`, `│`, `╵`) around the same block;
//! the frame is stripped before matching so both forms parse identically.
//! Blocks without a `line` location cannot be tied to the buffer and are
//! skipped.

use std::fmt;
use std::iter::Peekable;
use std::str::Lines;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

#[expect(
    clippy::expect_used,
    reason = "literal pattern exercised by the unit tests"
)]
static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<severity>Error|Warning): (?P<summary>.*)$").expect("header pattern")
});

#[expect(
    clippy::expect_used,
    reason = "literal pattern exercised by the unit tests"
)]
static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*on (?P<source>.+?) line (?P<line>\d+)(?:, (?P<scope>.*))?:\s*$")
        .expect("location pattern")
});

/// Severity reported by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// `Error: ...` blocks.
    Error,
    /// `Warning: ...` blocks.
    Warning,
}

impl Severity {
    fn from_label(label: &str) -> Self {
        if label == "Warning" {
            Self::Warning
        } else {
            Self::Error
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// One diagnostic block recognised in checker output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerProblem {
    /// One-based line in the text that was sent to the checker.
    pub line: usize,
    /// Block severity.
    pub severity: Severity,
    /// Text after `Error:` or `Warning:`.
    pub summary: String,
    /// Explanatory paragraph, or the summary when the block has none.
    pub message: String,
}

/// Lazily parses checker output into problems, in output order.
///
/// Each call starts a fresh scan from the beginning of `output`.
///
/// # Example
///
/// ```
/// use terrain_checker::{Severity, parse_output};
///
/// let output = "Error: Invalid expression\n\n  on <stdin> line 3:\n   3: a =\n\nExpected the start of an expression.\n";
/// let problems: Vec<_> = parse_output(output).collect();
/// assert_eq!(problems.len(), 1);
/// assert_eq!(problems[0].line, 3);
/// assert_eq!(problems[0].severity, Severity::Error);
/// assert_eq!(problems[0].message, "Expected the start of an expression.");
/// ```
#[must_use]
pub fn parse_output(output: &str) -> Problems<'_> {
    Problems {
        lines: output.lines().peekable(),
    }
}

/// Iterator returned by [`parse_output`].
#[derive(Debug)]
pub struct Problems<'a> {
    lines: Peekable<Lines<'a>>,
}

impl Iterator for Problems<'_> {
    type Item = CheckerProblem;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (severity, summary) = self.next_header()?;
            let Some(line) = self.location() else {
                continue;
            };
            self.skip_context();
            let message = self.message();
            return Some(CheckerProblem {
                line,
                severity,
                message: if message.is_empty() {
                    summary.clone()
                } else {
                    message
                },
                summary,
            });
        }
    }
}

impl<'a> Problems<'a> {
    fn peek_stripped(&mut self) -> Option<&'a str> {
        self.lines.peek().copied().map(strip_frame)
    }

    fn next_stripped(&mut self) -> Option<&'a str> {
        self.lines.next().map(strip_frame)
    }

    fn next_header(&mut self) -> Option<(Severity, String)> {
        while let Some(line) = self.next_stripped() {
            if let Some(captures) = HEADER.captures(line) {
                let severity = Severity::from_label(group(&captures, "severity"));
                return Some((severity, group(&captures, "summary").trim().to_owned()));
            }
        }
        None
    }

    /// Finds the block's location line, stopping short of the next header.
    fn location(&mut self) -> Option<usize> {
        while let Some(line) = self.peek_stripped() {
            if HEADER.is_match(line) {
                return None;
            }
            let parsed = LOCATION.captures(line).map(|captures| {
                captures
                    .name("line")
                    .and_then(|number| number.as_str().parse::<usize>().ok())
            });
            self.lines.next();
            if let Some(number) = parsed {
                return number;
            }
        }
        None
    }

    /// Skips the indented source excerpt and the blank lines after it.
    fn skip_context(&mut self) {
        while let Some(line) = self.peek_stripped() {
            let indented = line.starts_with([' ', '\t']);
            if !(line.trim().is_empty() || indented) || HEADER.is_match(line) {
                break;
            }
            self.lines.next();
        }
    }

    fn message(&mut self) -> String {
        let mut paragraph: Vec<&str> = Vec::new();
        while let Some(line) = self.peek_stripped() {
            let text = line.trim();
            if text.is_empty() || HEADER.is_match(line) {
                break;
            }
            paragraph.push(text);
            self.lines.next();
        }
        paragraph.join("\n")
    }
}

fn group<'h>(captures: &Captures<'h>, name: &str) -> &'h str {
    captures.name(name).map_or("", |found| found.as_str())
}

/// Removes the box-drawing frame of interactive renderings.
fn strip_frame(line: &str) -> &str {
    if line.starts_with(['╷', '╵']) {
        return "";
    }
    line.strip_prefix('│')
        .map_or(line, |rest| rest.strip_prefix(' ').unwrap_or(rest))
}
