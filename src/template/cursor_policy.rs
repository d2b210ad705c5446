//! Cursor rules around closed tokens.
//!
//! A closed token is atomic: a cursor offset never rests strictly inside it,
//! and single-step motion crosses it in one move.

use serde::{Deserialize, Serialize};

use crate::util::text::{char_len, char_type, CharType};

use super::scanner::{containing, ending_at, scan, starting_at, TokenSpan};

/// Which boundary to snap to when an offset lands inside a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affinity {
    /// The motion came from the left; snap to the token start
    FromLeft,
    /// The motion came from the right; snap to the token end
    FromRight,
    /// Pointer placement; snap to the closer boundary (ties go to the end)
    #[default]
    Nearest,
}

/// Clamp `offset` to `[0, len]`
pub fn clamp(text: &str, offset: usize) -> usize {
    offset.min(char_len(text))
}

/// Clamp `raw` and move it out of any token it lands inside.
pub fn resolve(text: &str, raw: usize, hint: Affinity) -> usize {
    let spans = scan(text);
    snap(&spans, clamp(text, raw), hint)
}

/// Snap an already-clamped offset against precomputed spans
pub(crate) fn snap(spans: &[TokenSpan], offset: usize, hint: Affinity) -> usize {
    let Some(span) = containing(spans, offset) else {
        return offset;
    };
    match hint {
        Affinity::FromLeft => span.start,
        Affinity::FromRight => span.end,
        Affinity::Nearest => {
            if offset - span.start < span.end - offset {
                span.start
            } else {
                span.end
            }
        }
    }
}

/// One step left; a token ending at `offset` is skipped whole.
pub fn move_left(text: &str, offset: usize) -> usize {
    let spans = scan(text);
    let offset = clamp(text, offset);

    if let Some(span) = containing(&spans, offset).or_else(|| ending_at(&spans, offset)) {
        return span.start;
    }
    offset.saturating_sub(1)
}

/// One step right; a token starting at `offset` is skipped whole.
pub fn move_right(text: &str, offset: usize) -> usize {
    let spans = scan(text);
    let len = char_len(text);
    let offset = offset.min(len);

    if let Some(span) = containing(&spans, offset).or_else(|| starting_at(&spans, offset)) {
        return span.end;
    }
    (offset + 1).min(len)
}

/// Move one word left. A token counts as a single word.
pub fn move_word_left(text: &str, offset: usize) -> usize {
    let spans = scan(text);
    let chars: Vec<char> = text.chars().collect();
    let mut pos = snap(&spans, offset.min(chars.len()), Affinity::FromLeft);

    // Skip whitespace first (moving backwards)
    while pos > 0
        && ending_at(&spans, pos).is_none()
        && char_type(chars[pos - 1]) == CharType::Whitespace
    {
        pos -= 1;
    }

    if let Some(span) = ending_at(&spans, pos) {
        return span.start;
    }
    if pos == 0 {
        return 0;
    }

    // Then skip the run of same-typed chars
    let run_type = char_type(chars[pos - 1]);
    while pos > 0 && ending_at(&spans, pos).is_none() && char_type(chars[pos - 1]) == run_type {
        pos -= 1;
    }
    pos
}

/// Move one word right. A token counts as a single word.
pub fn move_word_right(text: &str, offset: usize) -> usize {
    let spans = scan(text);
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut pos = snap(&spans, offset.min(len), Affinity::FromRight);

    if let Some(span) = starting_at(&spans, pos) {
        pos = span.end;
    } else if pos < len {
        // Skip current word type
        let run_type = char_type(chars[pos]);
        while pos < len && starting_at(&spans, pos).is_none() && char_type(chars[pos]) == run_type
        {
            pos += 1;
        }
    }

    // Skip any following whitespace
    while pos < len
        && starting_at(&spans, pos).is_none()
        && char_type(chars[pos]) == CharType::Whitespace
    {
        pos += 1;
    }
    pos
}

/// Start of the line containing `offset`
pub fn line_start(text: &str, offset: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let offset = offset.min(chars.len());
    let start = chars[..offset]
        .iter()
        .rposition(|&c| c == '\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    resolve(text, start, Affinity::FromLeft)
}

/// End of the line containing `offset` (before its newline)
pub fn line_end(text: &str, offset: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let offset = offset.min(chars.len());
    let end = chars[offset..]
        .iter()
        .position(|&c| c == '\n')
        .map(|i| offset + i)
        .unwrap_or(chars.len());
    resolve(text, end, Affinity::FromRight)
}
