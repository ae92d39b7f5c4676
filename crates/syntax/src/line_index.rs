use mqtt_types::{LineRange, OffsetRange, Position};
use std::sync::Arc;

/// Maps byte offsets to zero-based line/character positions and back.
///
/// Lines are separated by `\n`; a `\r` before it belongs to the line
/// terminator. Characters are counted in Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    text: Arc<str>,
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Get the number of lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset of the start of a line
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Byte offset where the content of `line` ends, before any terminator.
    fn line_end(&self, line: usize) -> usize {
        let Some(&next) = self.line_starts.get(line + 1) else {
            return self.text.len();
        };
        let end = next - 1;
        if end > 0 && self.text.as_bytes()[end - 1] == b'\r' {
            end - 1
        } else {
            end
        }
    }

    /// Convert a byte offset to a position.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the text or not on a char boundary.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        assert!(
            self.text.is_char_boundary(offset),
            "offset {offset} is out of bounds or not on a char boundary"
        );
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        let start = self.line_starts[line];
        let character = self.text[start..offset].chars().count();
        Position::new(to_u32(line), to_u32(character))
    }

    /// Convert a position to a byte offset.
    ///
    /// Returns `None` if the line does not exist or the character is past the
    /// end of the line's content.
    #[must_use]
    pub fn offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let character = position.character as usize;
        let start = self.line_start(line)?;
        let end = self.line_end(line);
        let content = &self.text[start..end];
        match content.char_indices().nth(character) {
            Some((i, _)) => Some(start + i),
            None if content.chars().count() == character => Some(end),
            None => None,
        }
    }

    /// Convert a byte range to a [`LineRange`] in `file`.
    #[must_use]
    pub fn range(&self, file: &str, range: OffsetRange) -> LineRange {
        LineRange::new(file, self.position(range.start), self.position(range.end))
    }

    /// Convert a [`LineRange`] back to a byte range.
    #[must_use]
    pub fn offset_range(&self, range: &LineRange) -> Option<OffsetRange> {
        Some(OffsetRange::new(
            self.offset(range.start)?,
            self.offset(range.end)?,
        ))
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_new() {
        let index = LineIndex::new("line 1\nline 2\nline 3");

        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(0), Some(0));
        assert_eq!(index.line_start(1), Some(7));
        assert_eq!(index.line_start(2), Some(14));
        assert_eq!(index.line_start(3), None);
    }

    #[test]
    fn test_line_index_position() {
        let index = LineIndex::new("line 1\nline 2\nline 3");

        assert_eq!(index.position(0), Position::new(0, 0));
        assert_eq!(index.position(6), Position::new(0, 6));
        assert_eq!(index.position(7), Position::new(1, 0));
        assert_eq!(index.position(20), Position::new(2, 6));
    }

    #[test]
    fn test_line_index_offset() {
        let index = LineIndex::new("line 1\nline 2\n");

        assert_eq!(index.offset(Position::new(1, 2)), Some(9));
        assert_eq!(index.offset(Position::new(1, 6)), Some(13));
        assert_eq!(index.offset(Position::new(1, 7)), None);
        assert_eq!(index.offset(Position::new(2, 0)), Some(14));
        assert_eq!(index.offset(Position::new(3, 0)), None);
    }

    #[test]
    fn test_line_index_crlf() {
        let index = LineIndex::new("ab\r\ncd");

        assert_eq!(index.line_count(), 2);
        assert_eq!(index.position(4), Position::new(1, 0));
        assert_eq!(index.offset(Position::new(0, 2)), Some(2));
        assert_eq!(index.offset(Position::new(0, 3)), None);
        assert_eq!(index.offset(Position::new(1, 2)), Some(6));
    }

    #[test]
    fn test_line_index_counts_chars() {
        let index = LineIndex::new("é = 1;\nü");

        assert_eq!(index.position(3), Position::new(0, 2));
        assert_eq!(index.offset(Position::new(0, 2)), Some(3));
        assert_eq!(index.position(index.offset(Position::new(1, 1)).unwrap()), Position::new(1, 1));
    }

    #[test]
    fn test_line_index_range() {
        let index = LineIndex::new("a\nservice on l {}\n");
        let range = index.range("main.bal", OffsetRange::new(2, 17));

        assert_eq!(range.file, "main.bal");
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(1, 15));
        assert_eq!(index.offset_range(&range), Some(OffsetRange::new(2, 17)));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_line_index_position_out_of_bounds() {
        let _ = LineIndex::new("abc").position(4);
    }
}
