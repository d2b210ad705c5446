//! Variable catalog: the ordered identifiers an operator may insert.
//!
//! Declaration order matters. Suggestions are listed in catalog order so the
//! catalog author can put the likeliest variables first.
//!
//! Catalog files are YAML:
//!
//! ```yaml
//! variables:
//!   - name: buyerName
//!     description: Buyer's display name
//!   - name: itemName
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::scanner::is_valid_identifier;

/// One catalog entry as stored in a catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Root structure of a catalog YAML file
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub variables: Vec<Variable>,
}

/// Borrowed view of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Ordered identifier -> description mapping. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableCatalog {
    entries: IndexMap<String, String>,
}

impl VariableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, description)` pairs, validating identifiers
    pub fn from_pairs<I, N, D>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        let mut entries = IndexMap::new();
        for (name, description) in pairs {
            let name = name.into();
            if !is_valid_identifier(&name) {
                return Err(CatalogError::InvalidIdentifier(name));
            }
            if entries.contains_key(&name) {
                return Err(CatalogError::DuplicateIdentifier(name));
            }
            entries.insert(name, description.into());
        }
        Ok(Self { entries })
    }

    /// The variables the storefront's buyer messages use
    pub fn storefront() -> Self {
        let entries = [
            ("buyerName", "Buyer's display name"),
            ("buyerEmail", "Buyer's email address"),
            ("orderId", "Order reference number"),
            ("itemName", "Purchased listing title"),
            ("itemPrice", "Price paid, formatted with currency"),
            ("quantity", "Units purchased"),
            ("accountLogin", "Delivered account login"),
            ("accountPassword", "Delivered account password"),
            ("storeName", "Storefront name"),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(name, description)| (name.to_string(), description.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Description for `name`, if declared
    pub fn description(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.entries.iter().map(|(name, description)| CatalogEntry {
            name,
            description,
        })
    }

    pub fn get_index(&self, index: usize) -> Option<CatalogEntry<'_>> {
        self.entries
            .get_index(index)
            .map(|(name, description)| CatalogEntry { name, description })
    }
}

/// Load a catalog from a YAML file
pub fn load_catalog_file(path: &Path) -> Result<VariableCatalog, CatalogError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| CatalogError::IoError(e.to_string()))?;

    parse_catalog_yaml(&content)
}

/// Parse a catalog from a YAML string
pub fn parse_catalog_yaml(yaml: &str) -> Result<VariableCatalog, CatalogError> {
    let file: CatalogFile =
        serde_yaml::from_str(yaml).map_err(|e| CatalogError::ParseError(e.to_string()))?;

    VariableCatalog::from_pairs(file.variables.into_iter().map(|v| (v.name, v.description)))
}

/// Errors from building or loading a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    IoError(String),
    ParseError(String),
    InvalidIdentifier(String),
    DuplicateIdentifier(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::IoError(e) => write!(f, "IO error: {}", e),
            CatalogError::ParseError(e) => write!(f, "Parse error: {}", e),
            CatalogError::InvalidIdentifier(name) => {
                write!(f, "Invalid variable name: {:?}", name)
            }
            CatalogError::DuplicateIdentifier(name) => {
                write!(f, "Variable declared twice: {}", name)
            }
        }
    }
}

impl std::error::Error for CatalogError {}
