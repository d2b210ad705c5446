//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

/// Side effect requested by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Caret, selection or suggestion list changed; repaint the field
    Redraw,
    /// The template string changed; carries the full new value
    TemplateChanged(String),
}

impl Cmd {
    /// True if this command reports a new template value
    pub fn is_change(&self) -> bool {
        matches!(self, Cmd::TemplateChanged(_))
    }

    /// The new template value, if this is a change notification
    pub fn changed_text(&self) -> Option<&str> {
        match self {
            Cmd::TemplateChanged(text) => Some(text),
            Cmd::Redraw => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_accessors() {
        let cmd = Cmd::TemplateChanged("Hi {buyerName}".into());
        assert!(cmd.is_change());
        assert_eq!(cmd.changed_text(), Some("Hi {buyerName}"));

        assert!(!Cmd::Redraw.is_change());
        assert_eq!(Cmd::Redraw.changed_text(), None);
    }
}
