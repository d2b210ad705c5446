//! Scripted edit sessions.
//!
//! A script is a list of [`TextEditMsg`]s in YAML (or JSON). Replaying it
//! against a template drives the same update path as interactive editing and
//! reports the final field state.
//!
//! ```yaml
//! - !Move DocumentEnd
//! - !InsertText " {buy"
//! - SuggestionNext
//! - AcceptSuggestion
//! ```

use serde::Serialize;

use crate::editable::{EditContext, TextEditMsg};
use crate::messages::Msg;
use crate::model::TemplateModel;
use crate::template::{render, Segment, SuggestionState};
use crate::update::update;

/// Final state after replaying a script
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub context: EditContext,
    pub text: String,
    pub cursor: usize,
    /// Messages that were applied (produced a command)
    pub applied: usize,
    /// Change notifications emitted
    pub changes: usize,
    pub suggestion: Option<SuggestionState>,
    pub suggestions: Vec<String>,
    pub segments: Vec<Segment>,
}

/// Errors from reading a replay script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    ParseError(String),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::ParseError(e) => write!(f, "Invalid replay script: {}", e),
        }
    }
}

impl std::error::Error for ReplayError {}

/// Parse a script. Input starting with `[` is read as JSON, anything else
/// as YAML.
pub fn parse_script(source: &str) -> Result<Vec<TextEditMsg>, ReplayError> {
    if source.trim_start().starts_with('[') {
        serde_json::from_str(source).map_err(|e| ReplayError::ParseError(e.to_string()))
    } else {
        serde_yaml::from_str(source).map_err(|e| ReplayError::ParseError(e.to_string()))
    }
}

/// Apply `script` to the `context` field of `model`
pub fn replay(
    model: &mut TemplateModel,
    context: EditContext,
    script: &[TextEditMsg],
) -> ReplayReport {
    let mut applied = 0;
    let mut changes = 0;

    for (step, msg) in script.iter().enumerate() {
        match update(model, Msg::TextEdit(context, msg.clone())) {
            Some(cmd) => {
                applied += 1;
                if let Some(text) = cmd.changed_text() {
                    changes += 1;
                    tracing::debug!(step, len = text.chars().count(), "Template changed");
                }
            }
            None => tracing::debug!(step, ?msg, "Step had no effect"),
        }
    }

    let text = model.text(context);
    ReplayReport {
        context,
        cursor: model.cursor_offset(context),
        applied,
        changes,
        suggestion: model.suggestion(context),
        suggestions: model.suggestion_names(context),
        segments: render::render(&text),
        text,
    }
}
