//! Storage backends for template fields.
//!
//! Short fields (the email subject) keep a plain `String`; message bodies
//! use a rope. Both are addressed in char offsets, which is also what the
//! token scanner and cursor policy speak.

use ropey::Rope;
use std::ops::Range;

use crate::util::text::char_to_byte;

use super::cursor::Position;

/// Read access to a field's text
pub trait TextBuffer {
    /// Length in chars
    fn len_chars(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Chars in `range`, clamped to the buffer
    fn slice(&self, range: Range<usize>) -> String;

    /// The whole template
    fn content(&self) -> String;

    /// Line/column of a char offset, for status display
    fn offset_to_position(&self, offset: usize) -> Position;
}

/// Write access. Edits arrive as planned `range -> replacement` pairs.
pub trait TextBufferMut: TextBuffer {
    fn insert(&mut self, offset: usize, text: &str);

    fn remove(&mut self, range: Range<usize>);

    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.remove(range.clone());
        self.insert(range.start, text);
    }

    fn clear(&mut self) {
        let len = self.len_chars();
        if len > 0 {
            self.remove(0..len);
        }
    }

    fn set_content(&mut self, text: &str) {
        self.clear();
        self.insert(0, text);
    }
}

// =============================================================================
// StringBuffer
// =============================================================================

/// Single-line field storage
#[derive(Debug, Clone, Default)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(s: &str) -> Self {
        Self { text: s.to_owned() }
    }
}

impl TextBuffer for StringBuffer {
    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        self.text.chars().skip(start).take(end - start).collect()
    }

    fn content(&self) -> String {
        self.text.clone()
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        self.text
            .chars()
            .take(offset)
            .fold(Position::zero(), |pos, ch| match ch {
                '\n' => Position::new(pos.line + 1, 0),
                _ => Position::new(pos.line, pos.column + 1),
            })
    }
}

impl TextBufferMut for StringBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let at = char_to_byte(&self.text, offset);
        self.text.insert_str(at, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start = char_to_byte(&self.text, range.start);
        let end = char_to_byte(&self.text, range.end);
        if start < end {
            self.text.replace_range(start..end, "");
        }
    }
}

// =============================================================================
// RopeBuffer
// =============================================================================

/// Message body storage
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl TextBuffer for RopeBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    fn content(&self) -> String {
        self.rope.to_string()
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        Position::new(line, offset - self.rope.line_to_char(line))
    }
}

impl TextBufferMut for RopeBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.len_chars());
        self.rope.insert(offset, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        if start < end {
            self.rope.remove(start..end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_buffer_replace_open_run() {
        let mut buf = StringBuffer::from_text("Hi {na");
        buf.replace(3..6, "{name}");
        assert_eq!(buf.content(), "Hi {name}");
        assert_eq!(buf.len_chars(), 9);
    }

    #[test]
    fn test_string_buffer_remove_utf8() {
        let mut buf = StringBuffer::from_text("héllo {wörld}");
        buf.remove(6..13);
        assert_eq!(buf.content(), "héllo ");
    }

    #[test]
    fn test_slice_clamps() {
        let buf = StringBuffer::from_text("hello world");
        assert_eq!(buf.slice(6..11), "world");
        assert_eq!(buf.slice(8..3), "");
        assert_eq!(RopeBuffer::from_text("hey").slice(1..50), "ey");
    }

    #[test]
    fn test_positions_agree() {
        let text = "hello\n{orderId}";
        let s = StringBuffer::from_text(text);
        let r = RopeBuffer::from_text(text);
        for offset in [0, 5, 6, 15] {
            assert_eq!(s.offset_to_position(offset), r.offset_to_position(offset));
        }
        assert_eq!(r.offset_to_position(15), Position::new(1, 9));
    }

    #[test]
    fn test_rope_buffer_edit() {
        let mut buf = RopeBuffer::from_text("Dear {buyerName},\nthanks");
        buf.replace(5..16, "customer");
        assert_eq!(buf.content(), "Dear customer,\nthanks");
    }

    #[test]
    fn test_set_content() {
        let mut buf = RopeBuffer::from_text("old");
        buf.set_content("{new}");
        assert_eq!(buf.content(), "{new}");
        buf.clear();
        assert!(buf.is_empty());
    }
}
