//! Editor configuration
//!
//! Stores user preferences in `~/.config/varfield/config.yaml`:
//!
//! ```yaml
//! default_context: whatsapp_message
//! catalog: catalogs/storefront.yaml   # relative to the config dir
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::editable::EditContext;
use crate::template::{load_catalog_file, CatalogError, VariableCatalog};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Field edited when none is specified
    #[serde(default)]
    pub default_context: EditContext,

    /// Catalog file; relative paths resolve against the config's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Directory the config was loaded from
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<EditorConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    return Self::default();
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                return Self::default();
            }
        };
        config.base_dir = path.parent().map(Path::to_path_buf);
        config
    }

    /// Configured catalog path, resolved against the config's directory
    pub fn catalog_path(&self) -> Option<PathBuf> {
        let path = self.catalog.as_ref()?;
        if path.is_absolute() {
            return Some(path.clone());
        }
        Some(match &self.base_dir {
            Some(base) => base.join(path),
            None => path.clone(),
        })
    }

    /// Load the variable catalog.
    ///
    /// An explicit path (`override_path`, then the config's `catalog`) must
    /// load. Otherwise `catalog.yaml` in the config dir is tried, and the
    /// built-in storefront catalog is the last resort.
    pub fn load_catalog(&self, override_path: Option<&Path>) -> Result<VariableCatalog, CatalogError> {
        if let Some(path) = override_path {
            return load_catalog_file(path);
        }
        if let Some(path) = self.catalog_path() {
            return load_catalog_file(&path);
        }

        if let Some(path) = crate::config_paths::catalog_file().filter(|p| p.exists()) {
            match load_catalog_file(&path) {
                Ok(catalog) => return Ok(catalog),
                Err(e) => {
                    tracing::warn!(
                        "Failed to load catalog at {}: {}; using built-in catalog",
                        path.display(),
                        e
                    );
                }
            }
        }
        Ok(VariableCatalog::storefront())
    }
}
