//! Plain-text and JSON rendering of command results.

use std::io::{self, Write};
use std::path::Path;

use terrain_checker::Diagnostic;
use terrain_syntax::{DefinitionKind, OutlineEntry};

use crate::AppError;

/// Writes the outline as an indented listing, two spaces per nesting level.
pub(crate) fn write_outline<W: Write>(out: &mut W, entries: &[OutlineEntry]) -> io::Result<()> {
    write_outline_level(out, entries, 0)
}

fn write_outline_level<W: Write>(
    out: &mut W,
    entries: &[OutlineEntry],
    depth: usize,
) -> io::Result<()> {
    for entry in entries {
        let kind = match entry.kind {
            DefinitionKind::Attribute => "attribute",
            DefinitionKind::Block => "block",
        };
        writeln!(
            out,
            "{:indent$}{kind} {name} (line {line})",
            "",
            indent = depth * 2,
            name = entry.name,
            line = entry.line,
        )?;
        write_outline_level(out, &entry.children, depth + 1)?;
    }
    Ok(())
}

/// Writes one `FILE:LINE: severity: message` line per diagnostic.
///
/// Multi-line messages are folded onto one line.
pub(crate) fn write_diagnostics<W: Write>(
    out: &mut W,
    path: &Path,
    diagnostics: &[Diagnostic],
) -> io::Result<()> {
    for diagnostic in diagnostics {
        let message = diagnostic.message.lines().collect::<Vec<_>>().join(" ");
        writeln!(
            out,
            "{}:{}: {}: {message}",
            path.display(),
            diagnostic.line,
            diagnostic.severity,
        )?;
    }
    Ok(())
}

/// Writes `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<W, T>(out: &mut W, value: &T) -> Result<(), AppError>
where
    W: Write,
    T: serde::Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}
