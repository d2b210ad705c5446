//! Edit constraints for template fields.
//!
//! Constraints define what operations are allowed in a field.

/// Character filter function type
pub type CharFilter = fn(char) -> bool;

/// Longest WhatsApp text message, in chars
pub const WHATSAPP_MAX_LENGTH: usize = 4096;

/// Longest email subject we let operators write
pub const EMAIL_SUBJECT_MAX_LENGTH: usize = 200;

/// Constraints that limit what operations are allowed in a field.
#[derive(Debug, Clone)]
pub struct EditConstraints {
    /// Allow multiple lines (Enter inserts newline vs is ignored)
    pub allow_multiline: bool,

    /// Allow text selection
    pub allow_selection: bool,

    /// Block every mutation; rendering and cursor movement still work
    pub read_only: bool,

    /// Maximum length in characters (None = unlimited)
    pub max_length: Option<usize>,

    /// Character filter (None = all characters allowed)
    /// Returns true if character is allowed
    pub char_filter: Option<CharFilter>,
}

impl Default for EditConstraints {
    fn default() -> Self {
        Self {
            allow_multiline: false,
            allow_selection: true,
            read_only: false,
            max_length: None,
            char_filter: None,
        }
    }
}

impl EditConstraints {
    /// Multi-line message body
    pub fn message_body() -> Self {
        Self {
            allow_multiline: true,
            ..Self::default()
        }
    }

    /// Single-line input (email subject)
    pub fn single_line() -> Self {
        Self {
            allow_multiline: false,
            max_length: Some(EMAIL_SUBJECT_MAX_LENGTH),
            char_filter: Some(|c| c != '\n' && c != '\r'),
            ..Self::default()
        }
    }

    /// WhatsApp message (multi-line, length capped)
    pub fn whatsapp() -> Self {
        Self {
            allow_multiline: true,
            max_length: Some(WHATSAPP_MAX_LENGTH),
            ..Self::default()
        }
    }

    /// Same constraints with mutation disabled
    pub fn disabled(self) -> Self {
        Self {
            read_only: true,
            ..self
        }
    }

    /// Check if a character passes the filter (if any)
    pub fn is_char_allowed(&self, ch: char) -> bool {
        if ch == '\n' && !self.allow_multiline {
            return false;
        }
        match self.char_filter {
            Some(filter) => filter(ch),
            None => true,
        }
    }

    /// Check if inserting text would exceed max length
    pub fn would_exceed_max_length(&self, current_len: usize, insert_len: usize) -> bool {
        if let Some(max) = self.max_length {
            current_len + insert_len > max
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_body_constraints() {
        let c = EditConstraints::message_body();
        assert!(c.allow_multiline);
        assert!(c.allow_selection);
        assert!(!c.read_only);
        assert!(c.is_char_allowed('{'));
        assert!(c.is_char_allowed('\n'));
    }

    #[test]
    fn test_single_line_constraints() {
        let c = EditConstraints::single_line();
        assert!(!c.allow_multiline);
        assert!(!c.is_char_allowed('\n'));
        assert!(!c.is_char_allowed('\r'));
        assert!(c.is_char_allowed('a'));
    }

    #[test]
    fn test_disabled() {
        let c = EditConstraints::whatsapp().disabled();
        assert!(c.read_only);
        assert_eq!(c.max_length, Some(WHATSAPP_MAX_LENGTH));
    }

    #[test]
    fn test_max_length() {
        let c = EditConstraints::single_line();
        assert!(!c.would_exceed_max_length(190, 10));
        assert!(c.would_exceed_max_length(195, 6));
        assert!(!EditConstraints::message_body().would_exceed_max_length(usize::MAX / 2, 1));
    }
}
