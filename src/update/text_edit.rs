//! Template field update handler.
//!
//! Routes TextEditMsg to the EditableTemplate selected by EditContext and
//! turns the outcome into a command: `TemplateChanged` after a mutation,
//! `Redraw` after caret, selection or suggestion-list changes.

use crate::commands::Cmd;
use crate::editable::{
    EditContext, EditableTemplate, MoveTarget, TextBuffer, TextBufferMut, TextEditMsg,
};
use crate::model::TemplateModel;

/// Handle a TextEditMsg by routing to the field for `context`.
pub fn update_text_edit(
    model: &mut TemplateModel,
    context: EditContext,
    msg: TextEditMsg,
) -> Option<Cmd> {
    model.focused = context;
    match context {
        EditContext::EmailSubject => update_template(&mut model.email_subject, &msg),
        EditContext::EmailBody => update_template(&mut model.email_body, &msg),
        EditContext::WhatsAppMessage => update_template(&mut model.whatsapp_message, &msg),
        EditContext::Preview => update_template(&mut model.preview, &msg),
    }
}

/// Apply a TextEditMsg to one field and report the resulting command.
pub fn update_template<B: TextBuffer + TextBufferMut>(
    state: &mut EditableTemplate<B>,
    msg: &TextEditMsg,
) -> Option<Cmd> {
    if msg.requires_multiline() && !state.constraints.allow_multiline {
        tracing::debug!(?msg, "Ignored in single-line field");
        return None;
    }

    if !apply_text_edit_msg(state, msg) {
        return None;
    }
    if msg.is_editing() {
        Some(Cmd::TemplateChanged(state.text()))
    } else {
        Some(Cmd::Redraw)
    }
}

/// Apply a TextEditMsg to an EditableTemplate.
/// Returns true if the state was modified (needs redraw).
pub fn apply_text_edit_msg<B: TextBuffer + TextBufferMut>(
    state: &mut EditableTemplate<B>,
    msg: &TextEditMsg,
) -> bool {
    match msg {
        // === Movement ===
        TextEditMsg::Move(target) => {
            apply_move(state, *target, false);
            true
        }
        TextEditMsg::MoveWithSelection(target) => {
            apply_move(state, *target, true);
            true
        }
        TextEditMsg::SetCursor { offset, affinity } => {
            state.set_cursor(*offset, *affinity);
            true
        }

        // === Insertion ===
        TextEditMsg::InsertChar(ch) => state.insert_char(*ch),
        TextEditMsg::InsertText(text) => state.insert_text(text),
        TextEditMsg::InsertNewline => state.insert_newline(),
        TextEditMsg::Paste(text) => state.paste(text),

        // === Deletion ===
        TextEditMsg::DeleteBackward => state.delete_backward(),
        TextEditMsg::DeleteForward => state.delete_forward(),
        TextEditMsg::DeleteWordBackward => state.delete_word_backward(),

        // === Selection ===
        TextEditMsg::SelectAll => {
            state.select_all();
            true
        }
        TextEditMsg::CollapseSelection => {
            state.collapse_selection();
            true
        }

        // === Suggestions ===
        TextEditMsg::SuggestionNext => state.suggestion_next(),
        TextEditMsg::SuggestionPrev => state.suggestion_prev(),
        TextEditMsg::AcceptSuggestion => state.accept_suggestion(),
        TextEditMsg::InsertToken(identifier) => state.insert_token(identifier),
        TextEditMsg::CancelSuggestion => state.cancel_suggestion(),
    }
}

/// Apply movement to an EditableTemplate.
fn apply_move<B: TextBuffer>(
    state: &mut EditableTemplate<B>,
    target: MoveTarget,
    extend_selection: bool,
) {
    match target {
        MoveTarget::Left => state.move_left(extend_selection),
        MoveTarget::Right => state.move_right(extend_selection),
        MoveTarget::WordLeft => state.move_word_left(extend_selection),
        MoveTarget::WordRight => state.move_word_right(extend_selection),
        MoveTarget::LineStart => state.move_line_start(extend_selection),
        MoveTarget::LineEnd => state.move_line_end(extend_selection),
        MoveTarget::DocumentStart => state.move_document_start(extend_selection),
        MoveTarget::DocumentEnd => state.move_document_end(extend_selection),
    }
}
