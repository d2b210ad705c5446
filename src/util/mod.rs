//! Utility modules

pub mod template_file;
pub mod text;

pub use template_file::{read_template, TemplateFileError};
pub use text::{char_len, char_type, CharType};
