//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::editable::{EditContext, TextEditMsg};

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Edit one of the template fields
    TextEdit(EditContext, TextEditMsg),
    /// Move keyboard focus to a field
    Focus(EditContext),
    /// Replace a field's value from outside (e.g. loading a stored template)
    SetTemplate(EditContext, String),
}

// Convenience constructors for common messages
impl Msg {
    /// Create a text edit message
    pub fn text_edit(context: EditContext, msg: TextEditMsg) -> Self {
        Msg::TextEdit(context, msg)
    }

    /// Create an insert character message
    pub fn insert_char(context: EditContext, ch: char) -> Self {
        Msg::TextEdit(context, TextEditMsg::InsertChar(ch))
    }

    /// Field this message is addressed to
    pub fn context(&self) -> EditContext {
        match self {
            Msg::TextEdit(context, _) | Msg::Focus(context) | Msg::SetTemplate(context, _) => {
                *context
            }
        }
    }
}
