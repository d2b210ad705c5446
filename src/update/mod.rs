//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod text_edit;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::TemplateModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use text_edit::{apply_text_edit_msg, update_template, update_text_edit};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut TemplateModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut TemplateModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::TextEdit(context, m) => update_text_edit(model, context, m),
        Msg::Focus(context) => {
            if model.focused == context {
                return None;
            }
            model.focused = context;
            Some(Cmd::Redraw)
        }
        // External value changes are not echoed back as change notifications
        Msg::SetTemplate(context, text) => {
            model.set_text(context, &text);
            Some(Cmd::Redraw)
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after caret state of the addressed field and logs diffs.
#[cfg(debug_assertions)]
fn update_traced(model: &mut TemplateModel, msg: Msg) -> Option<Cmd> {
    let context = msg.context();
    let msg_name = format!("{:?}", msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = model.snapshot(context);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    if let Some(diff) = before.diff(&model.snapshot(context)) {
        debug!(target: "caret", %diff, "state changed");
    }
    model.assert_invariants(context, &msg_name);

    result
}
