//! EditableTemplate - one template field with its cursor, selection and suggestion state.

use std::sync::Arc;

use crate::template::catalog::{CatalogEntry, VariableCatalog};
use crate::template::cursor_policy::{self, Affinity};
use crate::template::engine::{self, Edit};
use crate::template::render::{self, Segment};
use crate::template::scanner::{self, TokenSpan};
use crate::template::suggest::{self, SuggestionState};
use crate::util::text::char_len;

use super::buffer::{TextBuffer, TextBufferMut};
use super::constraints::EditConstraints;
use super::cursor::{Cursor, Position};
use super::selection::Selection;

/// Suggestion list currently shown, with its highlighted row
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveSuggestion {
    state: SuggestionState,
    highlighted: usize,
    /// End of the query as last typed; moves past it close the list
    typed_end: usize,
}

/// A template field: text buffer, caret, selection and autocomplete state.
///
/// Generic over the buffer type B (StringBuffer for short fields, RopeBuffer
/// for message bodies). Every mutation goes through a planned [`Edit`] from
/// the template engine, so closed tokens are never split and the cursor never
/// rests inside one.
#[derive(Debug, Clone)]
pub struct EditableTemplate<B: TextBuffer> {
    /// The text buffer
    pub buffer: B,
    /// Caret position
    pub cursor: Cursor,
    /// Selection; `selection.head` always equals `cursor.offset`
    pub selection: Selection,
    /// Constraints for this field
    pub constraints: EditConstraints,
    catalog: Arc<VariableCatalog>,
    suggestion: Option<ActiveSuggestion>,
    /// `{` offset of the run whose suggestions were dismissed
    dismissed: Option<usize>,
}

impl<B: TextBuffer> EditableTemplate<B> {
    /// Create a field over `buffer`. The caret starts at the end of the text.
    pub fn new(buffer: B, constraints: EditConstraints, catalog: Arc<VariableCatalog>) -> Self {
        let end = buffer.len_chars();
        Self {
            buffer,
            cursor: Cursor::new(end),
            selection: Selection::collapsed(end),
            constraints,
            catalog,
            suggestion: None,
            dismissed: None,
        }
    }

    /// Get the text content as a String
    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn cursor_offset(&self) -> usize {
        self.cursor.offset
    }

    /// Caret as line/column, for display
    pub fn cursor_position(&self) -> Position {
        self.buffer.offset_to_position(self.cursor.offset)
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Get the selected text (empty string if no selection)
    pub fn selected_text(&self) -> String {
        if self.selection.is_empty() {
            return String::new();
        }
        self.buffer.slice(self.selection.range())
    }

    pub fn is_disabled(&self) -> bool {
        self.constraints.read_only
    }

    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    /// Open suggestion run, if any
    pub fn suggestion(&self) -> Option<&SuggestionState> {
        self.suggestion.as_ref().map(|active| &active.state)
    }

    /// Catalog entries matching the open run's query
    pub fn suggestions(&self) -> Vec<CatalogEntry<'_>> {
        match &self.suggestion {
            Some(active) => suggest::suggest(&self.catalog, &active.state.query),
            None => Vec::new(),
        }
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.suggestion.as_ref().map(|active| active.highlighted)
    }

    /// The suggestion Enter/Tab would accept
    pub fn highlighted_suggestion(&self) -> Option<CatalogEntry<'_>> {
        let index = self.highlighted_index()?;
        self.suggestions().get(index).copied()
    }

    /// Closed tokens in the current text
    pub fn tokens(&self) -> Vec<TokenSpan> {
        scanner::scan(&self.text())
    }

    /// Text and token segments for display
    pub fn segments(&self) -> Vec<Segment> {
        render::render(&self.text())
    }

    /// Catalog description for a token chip
    pub fn describe(&self, identifier: &str) -> Option<&str> {
        render::describe(&self.catalog, identifier)
    }

    /// Tokens whose identifier is not in the catalog
    pub fn unknown_tokens(&self) -> Vec<TokenSpan> {
        render::unknown_tokens(&self.text(), &self.catalog)
    }

    /// Place the caret at `offset` and collapse or extend the selection.
    /// Suggestion mode survives only while the caret stays in the same run.
    fn move_cursor(&mut self, offset: usize, extend_selection: bool) {
        self.cursor.offset = offset;
        if extend_selection && self.constraints.allow_selection {
            self.selection.extend_to(offset);
        } else {
            self.selection = Selection::collapsed(offset);
        }
        self.refresh_suggestion_after_move();
    }

    fn refresh_suggestion_after_move(&mut self) {
        let Some(active) = self.suggestion.take() else {
            return;
        };
        if self.selection.is_empty() && self.cursor.offset <= active.typed_end {
            if let Some(state) = suggest::detect(&self.text(), self.cursor.offset) {
                if state.query_start == active.state.query_start {
                    let highlighted = if state.query == active.state.query {
                        active.highlighted
                    } else {
                        0
                    };
                    self.suggestion = Some(ActiveSuggestion {
                        state,
                        highlighted,
                        typed_end: active.typed_end,
                    });
                    return;
                }
            }
        }
        tracing::debug!(
            query_start = active.state.query_start,
            "Suggestion closed by cursor move"
        );
    }

    /// Recompute suggestion mode after the text changed
    fn refresh_suggestion_after_edit(&mut self, text: &str) {
        match suggest::detect(text, self.cursor.offset) {
            Some(state) if Some(state.query_start) == self.dismissed => {
                self.suggestion = None;
            }
            Some(state) => {
                if self.suggestion.is_none() {
                    tracing::debug!(
                        query_start = state.query_start,
                        "Suggestion mode activated"
                    );
                }
                self.dismissed = None;
                self.suggestion = Some(ActiveSuggestion {
                    typed_end: state.query_end(),
                    state,
                    highlighted: 0,
                });
            }
            None => {
                self.dismissed = None;
                self.suggestion = None;
            }
        }
    }

    /// Collapse selection to cursor position
    pub fn collapse_selection(&mut self) {
        self.selection = Selection::collapsed(self.cursor.offset);
    }

    /// Panic if caret, selection or suggestion state is inconsistent
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, context: &str) {
        let text = self.text();
        let len = self.buffer.len_chars();
        assert!(
            self.cursor.offset <= len,
            "[{}] cursor {} past end {}",
            context,
            self.cursor.offset,
            len
        );
        assert_eq!(
            self.selection.head, self.cursor.offset,
            "[{}] selection head out of sync with cursor",
            context
        );
        if let Some(span) = scanner::containing(&scanner::scan(&text), self.cursor.offset) {
            panic!(
                "[{}] cursor {} rests inside token {{{}}} at {}..{}",
                context, self.cursor.offset, span.identifier, span.start, span.end
            );
        }
        if let Some(active) = &self.suggestion {
            assert_eq!(
                suggest::detect(&text, self.cursor.offset).as_ref(),
                Some(&active.state),
                "[{}] stale suggestion state",
                context
            );
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self, _context: &str) {}
}

// =============================================================================
// Movement Operations
// =============================================================================

impl<B: TextBuffer> EditableTemplate<B> {
    /// Move left one char, or over a whole token
    pub fn move_left(&mut self, extend_selection: bool) {
        if !extend_selection && !self.selection.is_empty() {
            let start = self.selection.start();
            self.move_cursor(start, false);
            return;
        }
        let offset = cursor_policy::move_left(&self.text(), self.cursor.offset);
        self.move_cursor(offset, extend_selection);
    }

    /// Move right one char, or over a whole token
    pub fn move_right(&mut self, extend_selection: bool) {
        if !extend_selection && !self.selection.is_empty() {
            let end = self.selection.end();
            self.move_cursor(end, false);
            return;
        }
        let offset = cursor_policy::move_right(&self.text(), self.cursor.offset);
        self.move_cursor(offset, extend_selection);
    }

    pub fn move_word_left(&mut self, extend_selection: bool) {
        let offset = cursor_policy::move_word_left(&self.text(), self.cursor.offset);
        self.move_cursor(offset, extend_selection);
    }

    pub fn move_word_right(&mut self, extend_selection: bool) {
        let offset = cursor_policy::move_word_right(&self.text(), self.cursor.offset);
        self.move_cursor(offset, extend_selection);
    }

    pub fn move_line_start(&mut self, extend_selection: bool) {
        let offset = cursor_policy::line_start(&self.text(), self.cursor.offset);
        self.move_cursor(offset, extend_selection);
    }

    pub fn move_line_end(&mut self, extend_selection: bool) {
        let offset = cursor_policy::line_end(&self.text(), self.cursor.offset);
        self.move_cursor(offset, extend_selection);
    }

    pub fn move_document_start(&mut self, extend_selection: bool) {
        self.move_cursor(0, extend_selection);
    }

    pub fn move_document_end(&mut self, extend_selection: bool) {
        let end = self.buffer.len_chars();
        self.move_cursor(end, extend_selection);
    }

    /// Place the caret from a raw offset (pointer click), snapping out of tokens
    pub fn set_cursor(&mut self, offset: usize, affinity: Affinity) {
        let resolved = cursor_policy::resolve(&self.text(), offset, affinity);
        if resolved != offset {
            tracing::trace!(raw = offset, resolved, "Caret snapped out of token");
        }
        self.move_cursor(resolved, false);
    }

    /// Select all text
    pub fn select_all(&mut self) {
        if !self.constraints.allow_selection {
            return;
        }
        let end = self.buffer.len_chars();
        self.cursor.offset = end;
        self.selection = Selection::new(0, end);
        self.refresh_suggestion_after_move();
    }
}

// =============================================================================
// Editing Operations (require TextBufferMut)
// =============================================================================

impl<B: TextBuffer + TextBufferMut> EditableTemplate<B> {
    fn can_edit(&self) -> bool {
        if self.constraints.read_only {
            tracing::debug!("Edit ignored: field is disabled");
            return false;
        }
        true
    }

    /// Apply a planned edit to the buffer and settle the caret
    fn commit(&mut self, edit: Edit) -> bool {
        // Shrinking edits always pass, even on a field loaded over the limit
        let current_len = self.buffer.len_chars();
        let inserted_len = char_len(&edit.replacement);
        if inserted_len > edit.removed_len()
            && self.constraints.would_exceed_max_length(
                current_len - edit.removed_len(),
                inserted_len,
            )
        {
            tracing::debug!(
                max_length = self.constraints.max_length,
                "Edit rejected: template would exceed max length"
            );
            return false;
        }

        self.buffer.replace(edit.range.clone(), &edit.replacement);
        let text = self.text();
        let offset = engine::settle_cursor(&text, edit.cursor);
        self.cursor.offset = offset;
        self.selection = Selection::collapsed(offset);
        self.refresh_suggestion_after_edit(&text);
        true
    }

    /// Replace the selection (or insert at the caret) with `inserted`
    fn replace_selection_with(&mut self, inserted: &str) -> bool {
        let text = self.text();
        let edit = if self.selection.is_empty() {
            engine::plan_insert(&text, self.cursor.offset, inserted)
        } else {
            engine::plan_replace_range(&text, self.selection.range(), inserted)
        };
        match edit {
            Some(edit) => self.commit(edit),
            None => false,
        }
    }

    /// Insert a character at the cursor position
    /// Returns true if the character was inserted, false if rejected by constraints
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !self.can_edit() || !self.constraints.is_char_allowed(ch) {
            return false;
        }
        let mut buf = [0u8; 4];
        self.replace_selection_with(ch.encode_utf8(&mut buf))
    }

    /// Insert text at the cursor position
    /// Returns true if the text was inserted
    pub fn insert_text(&mut self, text: &str) -> bool {
        if !self.can_edit() {
            return false;
        }
        if !text.chars().all(|ch| self.constraints.is_char_allowed(ch)) {
            return false;
        }
        self.replace_selection_with(text)
    }

    /// Insert a newline; refused in single-line fields
    pub fn insert_newline(&mut self) -> bool {
        if !self.constraints.allow_multiline {
            return false;
        }
        self.insert_char('\n')
    }

    /// Paste clipboard text. Line breaks are normalized, and flattened to
    /// spaces in single-line fields.
    pub fn paste(&mut self, text: &str) -> bool {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let normalized = if self.constraints.allow_multiline {
            normalized
        } else {
            normalized.replace('\n', " ")
        };
        self.insert_text(&normalized)
    }

    /// Delete the char or token before the cursor (or the selection)
    pub fn delete_backward(&mut self) -> bool {
        if !self.can_edit() {
            return false;
        }
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        match engine::plan_delete_backward(&self.text(), self.cursor.offset) {
            Some(edit) => self.commit(edit),
            None => false,
        }
    }

    /// Delete the char or token after the cursor (or the selection)
    pub fn delete_forward(&mut self) -> bool {
        if !self.can_edit() {
            return false;
        }
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        match engine::plan_delete_forward(&self.text(), self.cursor.offset) {
            Some(edit) => self.commit(edit),
            None => false,
        }
    }

    /// Delete back to the previous word boundary; a token is one word
    pub fn delete_word_backward(&mut self) -> bool {
        if !self.can_edit() {
            return false;
        }
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        let text = self.text();
        let start = cursor_policy::move_word_left(&text, self.cursor.offset);
        if start == self.cursor.offset {
            return false;
        }
        match engine::plan_replace_range(&text, start..self.cursor.offset, "") {
            Some(edit) => self.commit(edit),
            None => false,
        }
    }

    /// Delete the selection, widened to whole tokens
    pub fn delete_selection(&mut self) -> bool {
        if !self.can_edit() || self.selection.is_empty() {
            return false;
        }
        match engine::plan_replace_range(&self.text(), self.selection.range(), "") {
            Some(edit) => self.commit(edit),
            None => false,
        }
    }

    /// Insert `{identifier}` over the open suggestion run
    pub fn insert_token(&mut self, identifier: &str) -> bool {
        let Some(query_start) = self.suggestion().map(|state| state.query_start) else {
            tracing::warn!(identifier, "Rejected token insert: no open suggestion");
            return false;
        };
        self.insert_token_at(query_start, identifier)
    }

    /// Insert `{identifier}` replacing `[query_start, cursor)`.
    ///
    /// `query_start` must match the suggestion run detected at the caret;
    /// mismatched or stale requests are logged and ignored.
    pub fn insert_token_at(&mut self, query_start: usize, identifier: &str) -> bool {
        if !self.can_edit() {
            return false;
        }
        let paired = self
            .suggestion()
            .is_some_and(|state| state.query_start == query_start);
        if !paired {
            tracing::warn!(
                query_start,
                identifier,
                "Rejected token insert: no matching suggestion"
            );
            return false;
        }

        match engine::plan_insert_token(&self.text(), query_start, self.cursor.offset, identifier)
        {
            Ok(edit) => {
                if !self.commit(edit) {
                    return false;
                }
                self.suggestion = None;
                self.dismissed = None;
                tracing::debug!(identifier, "Token inserted");
                true
            }
            Err(err) => {
                tracing::warn!(%err, "Rejected token insert");
                false
            }
        }
    }

    /// Insert the highlighted suggestion
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(name) = self.highlighted_suggestion().map(|entry| entry.name.to_string()) else {
            return false;
        };
        self.insert_token(&name)
    }

    /// Dismiss the suggestion list until the run is left or retyped
    pub fn cancel_suggestion(&mut self) -> bool {
        match self.suggestion.take() {
            Some(active) => {
                self.dismissed = Some(active.state.query_start);
                true
            }
            None => false,
        }
    }

    /// Highlight the next suggestion, wrapping
    pub fn suggestion_next(&mut self) -> bool {
        self.step_highlight(1)
    }

    /// Highlight the previous suggestion, wrapping
    pub fn suggestion_prev(&mut self) -> bool {
        let count = self.suggestions().len();
        self.step_highlight(count.saturating_sub(1))
    }

    fn step_highlight(&mut self, step: usize) -> bool {
        let count = self.suggestions().len();
        match &mut self.suggestion {
            Some(active) if count > 0 => {
                active.highlighted = (active.highlighted + step) % count;
                true
            }
            _ => false,
        }
    }

    /// Clear all content
    pub fn clear(&mut self) {
        self.set_content("");
    }

    /// Replace all content (external value change). Caret goes to the end.
    pub fn set_content(&mut self, text: &str) {
        self.buffer.set_content(text);
        let end = self.buffer.len_chars();
        self.cursor = Cursor::new(end);
        self.selection = Selection::collapsed(end);
        self.suggestion = None;
        self.dismissed = None;
    }
}
