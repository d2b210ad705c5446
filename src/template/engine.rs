//! Template mutations as pure transforms.
//!
//! Each operation is first planned as an [`Edit`] (a char range, its
//! replacement and the resulting cursor) so a stateful editor can apply it to
//! any buffer. The `insert_text` / `delete_*` / `insert_token` functions
//! apply the plan to a `&str` and report the new text, cursor and suggestion
//! state.

use std::ops::Range;

use crate::util::text::{char_len, char_to_byte};

use super::cursor_policy::{clamp, snap, Affinity};
use super::scanner::{containing, ending_at, is_valid_identifier, scan, starting_at, CLOSE, OPEN};
use super::suggest::{detect, SuggestionState};

/// A planned replacement of `range` (char offsets) by `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
    /// Cursor offset once the edit is applied
    pub cursor: usize,
}

impl Edit {
    /// Apply to `text`, returning the new string
    pub fn apply(&self, text: &str) -> String {
        let start = char_to_byte(text, self.range.start);
        let end = char_to_byte(text, self.range.end);
        let mut result = String::with_capacity(text.len() - (end - start) + self.replacement.len());
        result.push_str(&text[..start]);
        result.push_str(&self.replacement);
        result.push_str(&text[end..]);
        result
    }

    /// Chars removed by this edit
    pub fn removed_len(&self) -> usize {
        self.range.end - self.range.start
    }
}

/// Result of a mutation: `(new text, new offset)` plus suggestion state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub text: String,
    pub offset: usize,
    pub suggestion: Option<SuggestionState>,
}

impl EditOutcome {
    fn unchanged(text: &str, offset: usize) -> Self {
        let offset = clamp(text, offset);
        Self {
            text: text.to_string(),
            offset,
            suggestion: detect(text, offset),
        }
    }

    fn applied(text: &str, edit: &Edit) -> Self {
        let text = edit.apply(text);
        let offset = settle_cursor(&text, edit.cursor);
        let suggestion = detect(&text, offset);
        Self {
            text,
            offset,
            suggestion,
        }
    }
}

/// Keep a post-edit cursor out of closed tokens.
///
/// An edit can close a token around the cursor (typing `{` in front of
/// `name}`); the cursor then lands after the new token.
pub fn settle_cursor(text: &str, cursor: usize) -> usize {
    let spans = scan(text);
    snap(&spans, clamp(text, cursor), Affinity::FromRight)
}

// =============================================================================
// Planning
// =============================================================================

/// Plan an insertion. Empty input plans nothing.
pub fn plan_insert(text: &str, offset: usize, inserted: &str) -> Option<Edit> {
    if inserted.is_empty() {
        return None;
    }
    let spans = scan(text);
    let offset = snap(&spans, clamp(text, offset), Affinity::Nearest);
    Some(Edit {
        range: offset..offset,
        replacement: inserted.to_string(),
        cursor: offset + char_len(inserted),
    })
}

/// Plan a Backspace at `offset`.
pub fn plan_delete_backward(text: &str, offset: usize) -> Option<Edit> {
    let spans = scan(text);
    let offset = clamp(text, offset);

    if let Some(span) = containing(&spans, offset).or_else(|| ending_at(&spans, offset)) {
        tracing::debug!(identifier = %span.identifier, "Deleting token backward");
        return Some(Edit {
            range: span.range(),
            replacement: String::new(),
            cursor: span.start,
        });
    }
    if offset == 0 {
        return None;
    }
    Some(Edit {
        range: offset - 1..offset,
        replacement: String::new(),
        cursor: offset - 1,
    })
}

/// Plan a forward Delete at `offset`.
pub fn plan_delete_forward(text: &str, offset: usize) -> Option<Edit> {
    let spans = scan(text);
    let len = char_len(text);
    let offset = offset.min(len);

    if let Some(span) = containing(&spans, offset).or_else(|| starting_at(&spans, offset)) {
        tracing::debug!(identifier = %span.identifier, "Deleting token forward");
        return Some(Edit {
            range: span.range(),
            replacement: String::new(),
            cursor: span.start,
        });
    }
    if offset >= len {
        return None;
    }
    Some(Edit {
        range: offset..offset + 1,
        replacement: String::new(),
        cursor: offset,
    })
}

/// Plan replacing `range` with `replacement`.
///
/// The range is widened so every token it touches is removed whole. Plans
/// nothing if both the widened range and the replacement are empty.
pub fn plan_replace_range(text: &str, range: Range<usize>, replacement: &str) -> Option<Edit> {
    let spans = scan(text);
    let (a, b) = (clamp(text, range.start), clamp(text, range.end));
    let mut range = a.min(b)..a.max(b);

    for span in &spans {
        if span.partially_overlaps(&range) {
            range.start = range.start.min(span.start);
            range.end = range.end.max(span.end);
        }
    }
    // A collapsed range inside a token still must not split it
    if range.is_empty() {
        let at = snap(&spans, range.start, Affinity::Nearest);
        range = at..at;
    }

    if range.is_empty() && replacement.is_empty() {
        return None;
    }
    Some(Edit {
        cursor: range.start + char_len(replacement),
        range,
        replacement: replacement.to_string(),
    })
}

/// Plan accepting a suggestion: `[query_start, offset)` becomes
/// `{identifier}`.
///
/// `query_start` must be the unmatched `{` that suggestion detection reports
/// at `offset`; anything else is refused so the template is never corrupted.
pub fn plan_insert_token(
    text: &str,
    query_start: usize,
    offset: usize,
    identifier: &str,
) -> Result<Edit, InsertTokenError> {
    if !is_valid_identifier(identifier) {
        return Err(InsertTokenError::InvalidIdentifier(identifier.to_string()));
    }

    let len = char_len(text);
    if offset > len || query_start >= offset {
        return Err(InsertTokenError::OutOfRange {
            query_start,
            offset,
            len,
        });
    }

    let spans = scan(text);
    if containing(&spans, offset).is_some() {
        return Err(InsertTokenError::InsideToken { offset });
    }

    match detect(text, offset) {
        Some(state) if state.query_start == query_start => {}
        _ => return Err(InsertTokenError::NotAnOpenBrace { query_start }),
    }

    let replacement = format!("{}{}{}", OPEN, identifier, CLOSE);
    Ok(Edit {
        range: query_start..offset,
        cursor: query_start + char_len(&replacement),
        replacement,
    })
}

// =============================================================================
// String-level operations
// =============================================================================

/// Insert typed or pasted text at `offset`.
pub fn insert_text(text: &str, offset: usize, inserted: &str) -> EditOutcome {
    match plan_insert(text, offset, inserted) {
        Some(edit) => EditOutcome::applied(text, &edit),
        None => EditOutcome::unchanged(text, offset),
    }
}

/// Backspace: a token ending at `offset` goes in one edit.
pub fn delete_backward(text: &str, offset: usize) -> EditOutcome {
    match plan_delete_backward(text, offset) {
        Some(edit) => EditOutcome::applied(text, &edit),
        None => EditOutcome::unchanged(text, offset),
    }
}

/// Delete: a token starting at `offset` goes in one edit.
pub fn delete_forward(text: &str, offset: usize) -> EditOutcome {
    match plan_delete_forward(text, offset) {
        Some(edit) => EditOutcome::applied(text, &edit),
        None => EditOutcome::unchanged(text, offset),
    }
}

/// Delete a range, widened to whole tokens.
pub fn delete_range(text: &str, range: Range<usize>) -> EditOutcome {
    let fallback = range.start.min(range.end);
    match plan_replace_range(text, range, "") {
        Some(edit) => EditOutcome::applied(text, &edit),
        None => EditOutcome::unchanged(text, fallback),
    }
}

/// Replace `[query_start, offset)` with `{identifier}`; suggestion mode ends.
pub fn insert_token(
    text: &str,
    query_start: usize,
    offset: usize,
    identifier: &str,
) -> Result<EditOutcome, InsertTokenError> {
    let edit = plan_insert_token(text, query_start, offset, identifier)?;
    let text = edit.apply(text);
    Ok(EditOutcome {
        text,
        offset: edit.cursor,
        suggestion: None,
    })
}

/// Why a token insertion was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertTokenError {
    /// The identifier is empty or contains a brace
    InvalidIdentifier(String),
    /// Offsets do not describe a non-empty run inside the text
    OutOfRange {
        query_start: usize,
        offset: usize,
        len: usize,
    },
    /// The cursor sits inside a closed token
    InsideToken { offset: usize },
    /// `query_start` is not the unmatched `{` of an active suggestion
    NotAnOpenBrace { query_start: usize },
}

impl std::fmt::Display for InsertTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier(identifier) => {
                write!(f, "invalid token identifier {:?}", identifier)
            }
            Self::OutOfRange {
                query_start,
                offset,
                len,
            } => write!(
                f,
                "query range {}..{} is not valid for a template of {} chars",
                query_start, offset, len
            ),
            Self::InsideToken { offset } => {
                write!(f, "offset {} is inside a closed token", offset)
            }
            Self::NotAnOpenBrace { query_start } => {
                write!(f, "offset {} is not an unmatched '{{'", query_start)
            }
        }
    }
}

impl std::error::Error for InsertTokenError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(outcome: &EditOutcome) -> (&str, usize) {
        (outcome.text.as_str(), outcome.offset)
    }

    #[test]
    fn test_delete_backward_removes_token() {
        let out = delete_backward("Hello {name}!", 12);
        assert_eq!(pair(&out), ("Hello !", 6));
        assert!(out.suggestion.is_none());
    }

    #[test]
    fn test_delete_backward_single_char() {
        assert_eq!(pair(&delete_backward("Hello {name}!", 13)), ("Hello {name}", 12));
        assert_eq!(pair(&delete_backward("Hello", 3)), ("Helo", 2));
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        assert_eq!(pair(&delete_backward("abc", 0)), ("abc", 0));
        assert!(plan_delete_backward("abc", 0).is_none());
    }

    #[test]
    fn test_delete_backward_unclosed_run_by_char() {
        let out = delete_backward("Hello {na", 9);
        assert_eq!(pair(&out), ("Hello {n", 8));
        assert_eq!(out.suggestion.unwrap().query, "n");
    }

    #[test]
    fn test_delete_forward_removes_token() {
        assert_eq!(pair(&delete_forward("Hello {name}!", 6)), ("Hello !", 6));
        assert_eq!(pair(&delete_forward("Hello {name}!", 5)), ("Hello{name}!", 5));
        assert_eq!(pair(&delete_forward("abc", 3)), ("abc", 3));
    }

    #[test]
    fn test_delete_inside_token_removes_whole_token() {
        assert_eq!(pair(&delete_backward("a{bc}d", 3)), ("ad", 1));
        assert_eq!(pair(&delete_forward("a{bc}d", 3)), ("ad", 1));
    }

    #[test]
    fn test_insert_text_activates_suggestion() {
        let out = insert_text("Hello ", 6, "{na");
        assert_eq!(pair(&out), ("Hello {na", 9));
        let state = out.suggestion.unwrap();
        assert_eq!(state.query_start, 6);
        assert_eq!(state.query, "na");
    }

    #[test]
    fn test_typing_close_brace_completes_token() {
        let out = insert_text("Hello {name", 11, "}");
        assert_eq!(pair(&out), ("Hello {name}", 12));
        assert!(out.suggestion.is_none());
    }

    #[test]
    fn test_insert_never_splits_token() {
        // Offset 8 is inside {name}; it snaps to the closer boundary first
        assert_eq!(pair(&insert_text("Hello {name}", 8, "X")), ("Hello X{name}", 7));
        assert_eq!(pair(&insert_text("Hello {name}", 10, "X")), ("Hello {name}X", 13));
    }

    #[test]
    fn test_insert_closing_token_around_cursor() {
        // Typing `{` in front of `x}` closes a token; the cursor lands after it
        let out = insert_text("Hi x}", 3, "{");
        assert_eq!(pair(&out), ("Hi {x}", 6));
        assert!(out.suggestion.is_none());
    }

    #[test]
    fn test_insert_token() {
        let out = insert_token("Hello {na", 6, 9, "name").unwrap();
        assert_eq!(pair(&out), ("Hello {name}", 12));
        assert!(out.suggestion.is_none());
    }

    #[test]
    fn test_insert_token_mid_text() {
        let out = insert_token("Hi {it and more", 3, 6, "itemName").unwrap();
        assert_eq!(pair(&out), ("Hi {itemName} and more", 13));
    }

    #[test]
    fn test_insert_token_rejects_non_brace() {
        let err = insert_token("Hello {na", 5, 9, "name").unwrap_err();
        assert_eq!(err, InsertTokenError::NotAnOpenBrace { query_start: 5 });
    }

    #[test]
    fn test_insert_token_rejects_matched_brace() {
        assert!(insert_token("Hello {name}", 6, 12, "x").is_err());
        assert_eq!(
            insert_token("Hello {name}", 6, 9, "x").unwrap_err(),
            InsertTokenError::InsideToken { offset: 9 }
        );
    }

    #[test]
    fn test_insert_token_rejects_nested_run() {
        assert!(insert_token("{a{b", 2, 4, "x").is_err());
        assert!(insert_token("{a{b", 0, 4, "x").is_err());
    }

    #[test]
    fn test_insert_token_rejects_bad_input() {
        assert!(matches!(
            insert_token("Hello {na", 6, 9, "").unwrap_err(),
            InsertTokenError::InvalidIdentifier(_)
        ));
        assert!(matches!(
            insert_token("Hello {na", 6, 99, "name").unwrap_err(),
            InsertTokenError::OutOfRange { .. }
        ));
        assert!(matches!(
            insert_token("Hello {na", 9, 9, "name").unwrap_err(),
            InsertTokenError::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_delete_range_widens_to_tokens() {
        assert_eq!(pair(&delete_range("ab{cd}ef", 0..3)), ("ef", 0));
        assert_eq!(pair(&delete_range("ab{cd}ef", 7..4)), ("abf", 2));
        assert_eq!(pair(&delete_range("ab{cd}ef", 1..2)), ("a{cd}ef", 1));
        assert_eq!(pair(&delete_range("abc", 1..1)), ("abc", 1));
    }

    #[test]
    fn test_replace_range() {
        let edit = plan_replace_range("Hi {name}!", 3..5, "there").unwrap();
        assert_eq!(edit.range, 3..9);
        assert_eq!(edit.apply("Hi {name}!"), "Hi there!");
        assert_eq!(edit.cursor, 8);
    }

    #[test]
    fn test_edit_apply_utf8() {
        let edit = Edit {
            range: 1..2,
            replacement: "ee".to_string(),
            cursor: 3,
        };
        assert_eq!(edit.apply("héllo"), "heello");
        assert_eq!(edit.removed_len(), 1);
    }
}
