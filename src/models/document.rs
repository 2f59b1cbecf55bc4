//! In-memory document with offset/position conversion
//!
//! The resolver needs to read the text spanned by a declaration range and
//! translate between byte offsets and line/column positions. `Document`
//! holds the full text plus a line-start index so those conversions are
//! pure and cheap.

use crate::models::symbol::{Position, Range};

#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    line_starts: Vec<usize>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of a 0-indexed line/column position.
    ///
    /// Positions past the end of a line or past the last line clamp to the
    /// nearest valid offset, matching editor document semantics. Columns
    /// counted in non-byte units (UTF-16 exporters) may land inside a
    /// multi-byte character; those snap back to the preceding char boundary
    /// so the returned offset is always safe to slice at.
    pub fn offset_at(&self, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.line_starts.len() {
            return self.text.len();
        }
        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let mut offset = (line_start + position.column as usize).min(line_end);
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Position of a byte offset, clamped to the end of the document.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert) => insert - 1,
        };
        Position::new(line as u32, (offset - self.line_starts[line]) as u32)
    }

    /// Text spanned by a range.
    pub fn slice(&self, range: Range) -> &str {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end).max(start);
        &self.text[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new("fn alpha() {}\nstruct Beta {\n    x: u32,\n}\n")
    }

    #[test]
    fn test_offset_at_line_starts() {
        let doc = doc();
        assert_eq!(doc.offset_at(Position::new(0, 0)), 0);
        assert_eq!(doc.offset_at(Position::new(1, 0)), 14);
        assert_eq!(doc.offset_at(Position::new(1, 7)), 21);
    }

    #[test]
    fn test_offset_clamps_to_line_end() {
        let doc = doc();
        // Column past end of line 0 (13 chars) clamps to the newline
        assert_eq!(doc.offset_at(Position::new(0, 99)), 13);
        // Line past end of document clamps to text length
        assert_eq!(doc.offset_at(Position::new(42, 0)), doc.text().len());
    }

    #[test]
    fn test_position_at_round_trip() {
        let doc = doc();
        for offset in [0, 5, 13, 14, 21, doc.text().len()] {
            let pos = doc.position_at(offset);
            assert_eq!(doc.offset_at(pos), offset);
        }
    }

    #[test]
    fn test_slice_spans_lines() {
        let doc = doc();
        let range = Range::new(Position::new(1, 0), Position::new(1, 11));
        assert_eq!(doc.slice(range), "struct Beta");

        let multiline = Range::new(Position::new(1, 0), Position::new(2, 4));
        assert_eq!(doc.slice(multiline), "struct Beta {\n    ");
    }

    #[test]
    fn test_offset_snaps_inside_multibyte_char() {
        let doc = Document::new("日本語 alpha() {}\n");
        // Column 1 lands inside '日' (3 bytes); snap back to its start
        assert_eq!(doc.offset_at(Position::new(0, 1)), 0);
        assert_eq!(doc.offset_at(Position::new(0, 3)), 3);
        assert!(doc.text().is_char_boundary(doc.offset_at(Position::new(0, 5))));
    }

    #[test]
    fn test_slice_with_non_byte_columns() {
        let doc = Document::new("日本語 alpha() {}\n");
        let range = Range::new(Position::new(0, 1), Position::new(0, 9));
        // Never panics on a mid-char column, worst case widens to boundaries
        assert!(doc.slice(range).starts_with('日'));

        let exact = Range::new(Position::new(0, 10), Position::new(0, 15));
        assert_eq!(doc.slice(exact), "alpha");
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new("");
        assert_eq!(doc.offset_at(Position::new(0, 0)), 0);
        assert_eq!(doc.position_at(0), Position::new(0, 0));
    }
}
