//! Token-aware template core.
//!
//! Templates are flat strings where `{identifier}` placeholders are atomic:
//! the cursor never rests inside one, single-step motion and deletion treat
//! one as a unit, and typing an unclosed `{…` offers catalog completions.
//!
//! Everything here is a pure function of the current string. Nothing caches
//! scanner output across mutations.
//!
//! # Example
//!
//! ```ignore
//! use varfield::template::{engine, cursor_policy, suggest, VariableCatalog};
//!
//! let typed = engine::insert_text("Hello ", 6, "{na");
//! let state = typed.suggestion.unwrap();
//! let catalog = VariableCatalog::from_pairs([("name", ""), ("nationality", "")])?;
//! assert_eq!(suggest::suggest(&catalog, &state.query).len(), 2);
//!
//! let done = engine::insert_token(&typed.text, state.query_start, typed.offset, "name")?;
//! assert_eq!(done.text, "Hello {name}");
//! assert_eq!(cursor_policy::move_left(&done.text, done.offset), 6);
//! ```

pub mod catalog;
pub mod cursor_policy;
pub mod engine;
pub mod render;
pub mod scanner;
pub mod suggest;

pub use catalog::{
    load_catalog_file, parse_catalog_yaml, CatalogEntry, CatalogError, Variable, VariableCatalog,
};
pub use cursor_policy::Affinity;
pub use engine::{Edit, EditOutcome, InsertTokenError};
pub use render::Segment;
pub use scanner::TokenSpan;
pub use suggest::SuggestionState;
