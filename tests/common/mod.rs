//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use varfield::editable::{EditContext, TextEditMsg};
use varfield::messages::Msg;
use varfield::model::TemplateModel;
use varfield::template::{Affinity, VariableCatalog};
use varfield::update::update;
use varfield::Cmd;

/// Field most tests edit
pub const BODY: EditContext = EditContext::EmailBody;

/// The two-entry catalog used by the canonical examples
pub fn name_catalog() -> VariableCatalog {
    VariableCatalog::from_pairs([
        ("name", "Recipient name"),
        ("nationality", "Recipient nationality"),
    ])
    .unwrap()
}

/// Create a test model with `text` in the email body and the caret at `offset`
pub fn test_model(text: &str, offset: usize) -> TemplateModel {
    test_model_with_catalog(text, offset, name_catalog())
}

/// Same as [`test_model`] with an explicit catalog
pub fn test_model_with_catalog(
    text: &str,
    offset: usize,
    catalog: VariableCatalog,
) -> TemplateModel {
    let mut model = TemplateModel::new(Arc::new(catalog));
    model.set_text(BODY, text);
    update(
        &mut model,
        Msg::TextEdit(
            BODY,
            TextEditMsg::SetCursor {
                offset,
                affinity: Affinity::Nearest,
            },
        ),
    );
    model
}

/// Send one edit message to the body field
pub fn send(model: &mut TemplateModel, msg: TextEditMsg) -> Option<Cmd> {
    update(model, Msg::TextEdit(BODY, msg))
}

/// Type `text` one char at a time, returning the last command
pub fn type_text(model: &mut TemplateModel, text: &str) -> Option<Cmd> {
    let mut cmd = None;
    for ch in text.chars() {
        cmd = send(model, TextEditMsg::InsertChar(ch));
    }
    cmd
}

/// Body text
pub fn body(model: &TemplateModel) -> String {
    model.text(BODY)
}

/// Body caret offset
pub fn caret(model: &TemplateModel) -> usize {
    model.cursor_offset(BODY)
}
