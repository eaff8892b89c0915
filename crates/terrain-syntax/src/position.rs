//! Line and position helpers shared by the parser, indenter and checker.
//!
//! Tree-sitter positions are zero-based. For user-facing messages, we prefer
//! one-based line and column numbers.

use std::ops::Range;

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

/// Byte ranges of every line in a text.
///
/// Each range covers the line content without its terminator (`\n` or
/// `\r\n`). A text ending in a newline has a trailing empty line, matching
/// how editors number lines.
///
/// # Example
///
/// ```
/// use terrain_syntax::LineIndex;
///
/// let index = LineIndex::new("a = 1\nb = 2\n");
/// assert_eq!(index.line_count(), 3);
/// assert_eq!(index.line_range(1), Some(6..11));
/// assert_eq!(index.line_of_offset(7), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    lines: Vec<Range<usize>>,
}

impl LineIndex {
    /// Indexes the lines of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                let end = if offset > start && text.as_bytes().get(offset - 1) == Some(&b'\r') {
                    offset - 1
                } else {
                    offset
                };
                lines.push(start..end);
                start = offset + 1;
            }
        }
        lines.push(start..text.len());
        Self { lines }
    }

    /// Number of lines, counting a trailing empty line after a final newline.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content range of the zero-based `line`.
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        self.lines.get(line).cloned()
    }

    /// Content range of a one-based line number, clamped to the last line.
    ///
    /// Line `0` is treated as line `1`.
    #[must_use]
    pub fn clamped_line_range(&self, one_based: usize) -> Range<usize> {
        let zero_based = one_based.saturating_sub(1).min(self.lines.len() - 1);
        self.lines.get(zero_based).cloned().unwrap_or(0..0)
    }

    /// Zero-based line containing `offset`.
    ///
    /// Offsets past the end of the text map to the last line.
    #[must_use]
    pub fn line_of_offset(&self, offset: usize) -> usize {
        match self.lines.binary_search_by(|line| line.start.cmp(&offset)) {
            Ok(line) => line,
            Err(insertion) => insertion.saturating_sub(1),
        }
    }

    /// Tree-sitter point (zero-based row, byte column) for `offset`.
    #[must_use]
    pub fn point(&self, offset: usize) -> tree_sitter::Point {
        let row = self.line_of_offset(offset);
        let line_start = self.lines.get(row).map_or(0, |line| line.start);
        tree_sitter::Point::new(row, offset.saturating_sub(line_start))
    }
}

/// Returns the text of `range`, or an empty string when the range does not
/// fall on character boundaries.
pub(crate) fn slice(text: &str, range: Range<usize>) -> &str {
    text.get(range).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 1)]
    #[case("a", 1)]
    #[case("a\n", 2)]
    #[case("a\nb", 2)]
    #[case("a\r\nb\r\n", 3)]
    fn counts_lines_like_an_editor(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(LineIndex::new(text).line_count(), expected);
    }

    #[test]
    fn line_ranges_exclude_terminators() {
        let index = LineIndex::new("ab\r\ncd\n");
        assert_eq!(index.line_range(0), Some(0..2));
        assert_eq!(index.line_range(1), Some(4..6));
        assert_eq!(index.line_range(2), Some(7..7));
        assert_eq!(index.line_range(3), None);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 0)]
    #[case(3, 1)]
    #[case(5, 1)]
    #[case(99, 1)]
    fn maps_offsets_to_lines(#[case] offset: usize, #[case] line: usize) {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.line_of_offset(offset), line);
    }

    #[test]
    fn clamps_one_based_lines() {
        let index = LineIndex::new("first\nsecond");
        assert_eq!(index.clamped_line_range(1), 0..5);
        assert_eq!(index.clamped_line_range(2), 6..12);
        assert_eq!(index.clamped_line_range(7), 6..12);
        assert_eq!(index.clamped_line_range(0), 0..5);
    }

    #[test]
    fn points_use_byte_columns() {
        let index = LineIndex::new("a = 1\n  b = 2");
        assert_eq!(index.point(8), tree_sitter::Point::new(1, 2));
    }
}
