//! varfield - token-aware template editing
//!
//! Templates are plain strings in which `{identifier}` placeholders behave
//! as atomic tokens. The [`template`] module holds the pure operations
//! (scan, cursor policy, edits, suggestions, rendering); [`editable`] wraps
//! them in a stateful field driven by Elm-style messages.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod messages;
pub mod model;
pub mod replay;
pub mod template;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::TemplateModel;
pub use update::update;
