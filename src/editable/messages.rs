//! Message types for template field editing.

use serde::{Deserialize, Serialize};

use crate::template::Affinity;

/// Target for cursor movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveTarget {
    /// Move one character (or one whole token) left
    Left,
    /// Move one character (or one whole token) right
    Right,
    /// Move one word left
    WordLeft,
    /// Move one word right
    WordRight,
    /// Move to start of line
    LineStart,
    /// Move to end of line
    LineEnd,
    /// Move to start of template
    DocumentStart,
    /// Move to end of template
    DocumentEnd,
}

/// Unified message type for template field editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextEditMsg {
    // === Movement ===
    /// Move cursor without affecting selection
    Move(MoveTarget),
    /// Move cursor and extend selection
    MoveWithSelection(MoveTarget),
    /// Place the cursor at a raw offset (pointer click, IME), snapped out of tokens
    SetCursor {
        offset: usize,
        #[serde(default)]
        affinity: Affinity,
    },

    // === Insertion ===
    /// Insert a single character
    InsertChar(char),
    /// Insert a string (e.g., from a key sequence)
    InsertText(String),
    /// Insert a newline (ignored in single-line fields)
    InsertNewline,
    /// Paste text from the clipboard
    Paste(String),

    // === Deletion ===
    /// Delete character or token before cursor (Backspace)
    DeleteBackward,
    /// Delete character or token after cursor (Delete)
    DeleteForward,
    /// Delete word before cursor (Ctrl/Option+Backspace)
    DeleteWordBackward,

    // === Selection ===
    /// Select all text
    SelectAll,
    /// Collapse selection to cursor position
    CollapseSelection,

    // === Suggestions ===
    /// Highlight the next suggestion (wraps)
    SuggestionNext,
    /// Highlight the previous suggestion (wraps)
    SuggestionPrev,
    /// Insert the highlighted suggestion as a token
    AcceptSuggestion,
    /// Insert a specific catalog identifier over the open `{…` run
    InsertToken(String),
    /// Dismiss the suggestion list
    CancelSuggestion,
}

impl TextEditMsg {
    /// Check if this message modifies the buffer
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            TextEditMsg::InsertChar(_)
                | TextEditMsg::InsertText(_)
                | TextEditMsg::InsertNewline
                | TextEditMsg::Paste(_)
                | TextEditMsg::DeleteBackward
                | TextEditMsg::DeleteForward
                | TextEditMsg::DeleteWordBackward
                | TextEditMsg::AcceptSuggestion
                | TextEditMsg::InsertToken(_)
        )
    }

    /// Check if this message requires multiline support
    pub fn requires_multiline(&self) -> bool {
        matches!(self, TextEditMsg::InsertNewline)
    }
}
