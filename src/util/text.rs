//! Utility functions for text editing
//!
//! All editor offsets are char indices; these helpers bridge them to the byte
//! offsets `str` slicing needs.

/// Symbols that end a word. `_` belongs to identifiers like `order_id`.
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation() && ch != '_'
}

/// Character type for word navigation (IntelliJ-style)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    /// Whitespace characters
    Whitespace,
    /// Alphanumeric characters (word characters)
    WordChar,
    /// Punctuation and symbols
    Punctuation,
}

/// Get the character type for word navigation
pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// Number of chars in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Convert a char offset to a byte offset, clamping to the end of `text`
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Slice `text` by char range (clamped)
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end.max(start));
    &text[start_byte..end_byte]
}
