//! Logging setup and field-state diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=caret=trace` - caret and selection diffs only
//! - `RUST_LOG=varfield::template=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/varfield/logs/varfield.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::{EditableTemplate, TextBuffer};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`) and goes to stderr so
/// command output on stdout stays machine readable.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of a field's caret/suggestion state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub len: usize,
    pub offset: usize,
    pub anchor: usize,
    pub suggestion_start: Option<usize>,
    pub highlighted: Option<usize>,
}

impl FieldSnapshot {
    pub fn from_field<B: TextBuffer>(field: &EditableTemplate<B>) -> Self {
        Self {
            len: field.buffer.len_chars(),
            offset: field.cursor.offset,
            anchor: field.selection.anchor,
            suggestion_start: field.suggestion().map(|s| s.query_start),
            highlighted: field.highlighted_index(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &FieldSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.len != other.len {
            changes.push(format!("len: {} → {}", self.len, other.len));
        }
        if self.offset != other.offset {
            changes.push(format!("caret: {} → {}", self.offset, other.offset));
        }
        let was_selected = self.anchor != self.offset;
        let is_selected = other.anchor != other.offset;
        if was_selected != is_selected {
            let status = if is_selected { "active" } else { "cleared" };
            changes.push(format!("selection {}", status));
        }
        match (self.suggestion_start, other.suggestion_start) {
            (None, Some(start)) => changes.push(format!("suggestions opened at {}", start)),
            (Some(_), None) => changes.push("suggestions closed".to_string()),
            _ => {
                if self.highlighted != other.highlighted {
                    changes.push(format!(
                        "highlight: {:?} → {:?}",
                        self.highlighted, other.highlighted
                    ));
                }
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
