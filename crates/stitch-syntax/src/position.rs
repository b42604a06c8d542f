//! Shared position conversion helpers.
//!
//! Tree-sitter positions are zero-based with byte columns. Callers in the
//! browser report one-based lines and columns counted in UTF-16 code units,
//! so both directions are needed.

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

/// Byte offsets of the start of every line in a source text.
///
/// Offsets are measured in encoded UTF-8 bytes so they agree with the parser's
/// node offsets even when the text contains multi-byte characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Builds the index by accumulating per-line byte lengths.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        let mut offset = 0_usize;
        for line in source.split_inclusive('\n') {
            offset = offset.saturating_add(line.len());
            if line.ends_with('\n') {
                starts.push(offset);
            }
        }
        Self {
            starts,
            len: source.len(),
        }
    }

    /// Returns the number of lines in the source.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Returns the byte offset at which a zero-based line starts.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.starts.get(line).copied()
    }

    /// Returns the byte range of a zero-based line, including its newline.
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<std::ops::Range<usize>> {
        let start = self.line_start(line)?;
        let end = self.line_start(line.saturating_add(1)).unwrap_or(self.len);
        Some(start..end)
    }

    /// Returns the zero-based line containing a byte offset.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert) => insert.saturating_sub(1),
        }
    }

    /// Converts a one-based line and a zero-based UTF-16 column into a byte
    /// offset.
    ///
    /// Columns past the end of the line clamp to the line end. Returns `None`
    /// when the line does not exist.
    #[must_use]
    pub fn offset_of(&self, source: &str, line: u32, utf16_column: u32) -> Option<usize> {
        let zero_based = usize::try_from(line.checked_sub(1)?).ok()?;
        let range = self.line_range(zero_based)?;
        let text = source.get(range.clone())?;
        let column = usize::try_from(utf16_column).ok()?;
        Some(range.start.saturating_add(utf16_prefix_bytes(text, column)))
    }
}

/// Returns the encoded byte length of the prefix of `text` spanning `units`
/// UTF-16 code units.
#[must_use]
pub fn utf16_prefix_bytes(text: &str, units: usize) -> usize {
    let mut seen = 0_usize;
    for (index, ch) in text.char_indices() {
        if seen >= units || ch == '\n' {
            return index;
        }
        seen = seen.saturating_add(ch.len_utf16());
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn line_index_tracks_byte_offsets() {
        let source = "ab\ncdé\nf";
        let index = LineIndex::new(source);
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(1), Some(3));
        // `é` occupies two bytes, so line 3 starts at byte 8.
        assert_eq!(index.line_start(2), Some(8));
        assert_eq!(index.line_of(9), 2);
    }

    #[test]
    fn trailing_newline_opens_an_empty_line() {
        let index = LineIndex::new("a\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_range(1), Some(2..2));
    }

    #[rstest]
    #[case("héllo", 2, 3)]
    #[case("😀x", 2, 4)]
    #[case("😀x", 3, 5)]
    #[case("abc", 10, 3)]
    fn utf16_columns_convert_to_bytes(
        #[case] text: &str,
        #[case] units: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(utf16_prefix_bytes(text, units), expected);
    }

    #[test]
    fn offset_of_uses_one_based_lines() {
        let source = "first\n  <p>é</p>\n";
        let index = LineIndex::new(source);
        assert_eq!(index.offset_of(source, 2, 2), Some(8));
        assert_eq!(index.offset_of(source, 0, 0), None);
        assert_eq!(index.offset_of(source, 9, 0), None);
    }
}
