//! Template field editing for the varfield editor.
//!
//! Each field (email subject, email body, WhatsApp message) is an
//! [`EditableTemplate`]: a text buffer whose `{identifier}` placeholders
//! behave as atomic tokens, plus the caret, selection and suggestion state
//! around it.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: Traits abstracting over buffer implementations
//! - [`StringBuffer`]: Buffer for short fields (backed by `String`)
//! - [`RopeBuffer`]: Buffer for message bodies (backed by `ropey::Rope`)
//! - [`EditableTemplate`]: Field state; all edits are planned by [`crate::template::engine`]
//! - [`EditConstraints`]: Per-field restrictions (multiline, length, read-only)
//! - [`EditContext`]: Identifies which field a message is for
//! - [`TextEditMsg`]: Unified message type for all editing operations
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use varfield::editable::{EditableTemplate, StringBuffer, EditConstraints};
//! use varfield::template::VariableCatalog;
//!
//! let mut field = EditableTemplate::new(
//!     StringBuffer::from_text("Hi "),
//!     EditConstraints::single_line(),
//!     Arc::new(VariableCatalog::storefront()),
//! );
//!
//! field.insert_text("{buy");
//! assert!(field.accept_suggestion());
//! assert_eq!(field.text(), "Hi {buyerName}");
//! ```

mod buffer;
mod constraints;
mod context;
mod cursor;
mod messages;
mod selection;
mod state;

// Re-export main types
pub use buffer::{RopeBuffer, StringBuffer, TextBuffer, TextBufferMut};
pub use constraints::{CharFilter, EditConstraints, EMAIL_SUBJECT_MAX_LENGTH, WHATSAPP_MAX_LENGTH};
pub use context::EditContext;
pub use cursor::{Cursor, Position};
pub use messages::{MoveTarget, TextEditMsg};
pub use selection::Selection;
pub use state::EditableTemplate;
