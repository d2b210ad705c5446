//! Edit context for template fields.
//!
//! Identifies which template field (email subject, email body, WhatsApp
//! message) a message is for.

use serde::{Deserialize, Serialize};

use super::constraints::EditConstraints;

/// Identifies which template field a message is for.
///
/// Used for routing text editing messages to the right editor and for
/// picking the constraints that apply.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum EditContext {
    /// Subject line of the buyer email
    EmailSubject,

    /// Body of the buyer email
    #[default]
    EmailBody,

    /// WhatsApp message text
    #[serde(rename = "whatsapp_message")]
    #[value(name = "whatsapp-message")]
    WhatsAppMessage,

    /// Read-only preview of a stored template
    Preview,
}

impl EditContext {
    /// Get the constraints for this context
    pub fn constraints(&self) -> EditConstraints {
        match self {
            EditContext::EmailSubject => EditConstraints::single_line(),
            EditContext::EmailBody => EditConstraints::message_body(),
            EditContext::WhatsAppMessage => EditConstraints::whatsapp(),
            EditContext::Preview => EditConstraints::message_body().disabled(),
        }
    }

    /// Human-readable field name
    pub fn label(&self) -> &'static str {
        match self {
            EditContext::EmailSubject => "Email subject",
            EditContext::EmailBody => "Email body",
            EditContext::WhatsAppMessage => "WhatsApp message",
            EditContext::Preview => "Preview",
        }
    }
}
