//! Command-line argument parsing
//!
//! Supports:
//! - Rendering a template into text/token segments
//! - Checking a template against the variable catalog
//! - Listing catalog suggestions for a query
//! - Replaying a scripted edit session
//!
//! `FILE` arguments accept `-` for stdin.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::editable::EditContext;

/// Edit and check message templates with {variable} placeholders
#[derive(Parser, Debug)]
#[command(
    name = "varfield",
    version,
    about = "Edit and check message templates with {variable} placeholders"
)]
pub struct CliArgs {
    /// Variable catalog (YAML) to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Split a template into literal text and placeholder segments
    Render {
        /// Template file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print segments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report placeholders that are not in the catalog (exit code 1 if any)
    Check {
        /// Template file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List catalog variables whose name contains QUERY
    Suggest {
        /// Case-insensitive filter; lists every variable when omitted
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a scripted edit session to a template and print the result
    Replay {
        /// Initial template file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// YAML or JSON list of edit messages
        #[arg(long, value_name = "SCRIPT")]
        script: PathBuf,

        /// Field whose constraints apply (defaults to the configured field)
        #[arg(long, value_enum)]
        context: Option<EditContext>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Whether output should be JSON
    pub fn json(&self) -> bool {
        match self {
            Command::Render { json, .. }
            | Command::Check { json, .. }
            | Command::Suggest { json, .. }
            | Command::Replay { json, .. } => *json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_render_from_stdin() {
        let args = parse(&["varfield", "render", "-", "--json"]);
        assert_eq!(
            args.command,
            Command::Render {
                file: PathBuf::from("-"),
                json: true
            }
        );
        assert!(args.catalog.is_none());
    }

    #[test]
    fn test_global_catalog_after_subcommand() {
        let args = parse(&["varfield", "check", "t.txt", "--catalog", "vars.yaml"]);
        assert_eq!(args.catalog, Some(PathBuf::from("vars.yaml")));
        assert!(!args.command.json());
    }

    #[test]
    fn test_suggest_query_optional() {
        let args = parse(&["varfield", "suggest"]);
        assert_eq!(
            args.command,
            Command::Suggest {
                query: None,
                json: false
            }
        );
    }

    #[test]
    fn test_replay_context() {
        let args = parse(&[
            "varfield",
            "replay",
            "t.txt",
            "--script",
            "s.yaml",
            "--context",
            "whatsapp-message",
        ]);
        match args.command {
            Command::Replay {
                script, context, ..
            } => {
                assert_eq!(script, PathBuf::from("s.yaml"));
                assert_eq!(context, Some(EditContext::WhatsAppMessage));
            }
            other => panic!("Expected Replay, got {:?}", other),
        }
    }

    #[test]
    fn test_replay_requires_script() {
        assert!(CliArgs::try_parse_from(["varfield", "replay", "t.txt"]).is_err());
    }
}
