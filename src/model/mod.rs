//! Application model - the template fields of one message template
//!
//! A storefront message template has an email subject, an email body and a
//! WhatsApp message. All fields share one injected variable catalog.

use std::sync::Arc;

use crate::config::EditorConfig;
use crate::editable::{
    EditConstraints, EditContext, EditableTemplate, RopeBuffer, StringBuffer, TextBuffer,
    TextBufferMut,
};
use crate::template::{SuggestionState, VariableCatalog};
use crate::tracing::FieldSnapshot;

/// The complete application model
#[derive(Debug, Clone)]
pub struct TemplateModel {
    /// Email subject line (single line)
    pub email_subject: EditableTemplate<StringBuffer>,
    /// Email body
    pub email_body: EditableTemplate<RopeBuffer>,
    /// WhatsApp message
    pub whatsapp_message: EditableTemplate<RopeBuffer>,
    /// Read-only preview of a stored template
    pub preview: EditableTemplate<RopeBuffer>,
    /// Field receiving keyboard input
    pub focused: EditContext,
    catalog: Arc<VariableCatalog>,
}

/// Run `$body` with `$field` bound to the field for `$context`
macro_rules! with_field {
    ($model:expr, $context:expr, |$field:ident| $body:expr) => {
        match $context {
            EditContext::EmailSubject => {
                let $field = &$model.email_subject;
                $body
            }
            EditContext::EmailBody => {
                let $field = &$model.email_body;
                $body
            }
            EditContext::WhatsAppMessage => {
                let $field = &$model.whatsapp_message;
                $body
            }
            EditContext::Preview => {
                let $field = &$model.preview;
                $body
            }
        }
    };
}

impl TemplateModel {
    /// Empty fields sharing `catalog`, focused on the email body
    pub fn new(catalog: Arc<VariableCatalog>) -> Self {
        Self {
            email_subject: EditableTemplate::new(
                StringBuffer::new(),
                EditContext::EmailSubject.constraints(),
                Arc::clone(&catalog),
            ),
            email_body: field(EditContext::EmailBody.constraints(), &catalog),
            whatsapp_message: field(EditContext::WhatsAppMessage.constraints(), &catalog),
            preview: field(EditContext::Preview.constraints(), &catalog),
            focused: EditContext::default(),
            catalog,
        }
    }

    /// Model focused on the configured default field
    pub fn with_config(config: &EditorConfig, catalog: Arc<VariableCatalog>) -> Self {
        Self {
            focused: config.default_context,
            ..Self::new(catalog)
        }
    }

    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    /// Current value of a field
    pub fn text(&self, context: EditContext) -> String {
        with_field!(self, context, |field| field.text())
    }

    /// Caret offset of a field
    pub fn cursor_offset(&self, context: EditContext) -> usize {
        with_field!(self, context, |field| field.cursor_offset())
    }

    /// Open suggestion run of a field
    pub fn suggestion(&self, context: EditContext) -> Option<SuggestionState> {
        with_field!(self, context, |field| field.suggestion().cloned())
    }

    /// Names currently suggested in a field, in catalog order
    pub fn suggestion_names(&self, context: EditContext) -> Vec<String> {
        with_field!(self, context, |field| field
            .suggestions()
            .iter()
            .map(|entry| entry.name.to_string())
            .collect())
    }

    /// Replace a field's value, bypassing constraints (stored templates
    /// are loaded into read-only previews too)
    pub fn set_text(&mut self, context: EditContext, text: &str) {
        match context {
            EditContext::EmailSubject => self.email_subject.set_content(text),
            EditContext::EmailBody => self.email_body.set_content(text),
            EditContext::WhatsAppMessage => self.whatsapp_message.set_content(text),
            EditContext::Preview => self.preview.set_content(text),
        }
    }

    /// Caret/suggestion snapshot of a field, for update tracing
    pub fn snapshot(&self, context: EditContext) -> FieldSnapshot {
        with_field!(self, context, |field| FieldSnapshot::from_field(field))
    }

    /// Check field invariants (debug builds only)
    pub fn assert_invariants(&self, context: EditContext, msg_name: &str) {
        with_field!(self, context, |field| field.assert_invariants(msg_name))
    }
}

fn field<B>(constraints: EditConstraints, catalog: &Arc<VariableCatalog>) -> EditableTemplate<B>
where
    B: TextBuffer + TextBufferMut + Default,
{
    EditableTemplate::new(B::default(), constraints, Arc::clone(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_get_context_constraints() {
        let model = TemplateModel::new(Arc::new(VariableCatalog::storefront()));
        assert!(!model.email_subject.constraints.allow_multiline);
        assert!(model.email_body.constraints.allow_multiline);
        assert!(model.whatsapp_message.constraints.max_length.is_some());
        assert!(model.preview.is_disabled());
    }

    #[test]
    fn test_set_text_routes_by_context() {
        let mut model = TemplateModel::new(Arc::new(VariableCatalog::storefront()));
        model.set_text(EditContext::WhatsAppMessage, "Order {orderId} shipped");
        model.set_text(EditContext::Preview, "read only {buyerName}");

        assert_eq!(model.text(EditContext::WhatsAppMessage), "Order {orderId} shipped");
        assert_eq!(model.text(EditContext::Preview), "read only {buyerName}");
        assert_eq!(model.text(EditContext::EmailBody), "");
        assert_eq!(model.cursor_offset(EditContext::WhatsAppMessage), 23);
    }

    #[test]
    fn test_with_config_focus() {
        let mut config = EditorConfig::default();
        config.default_context = EditContext::EmailSubject;
        let model = TemplateModel::with_config(&config, Arc::new(VariableCatalog::new()));
        assert_eq!(model.focused, EditContext::EmailSubject);
    }
}
