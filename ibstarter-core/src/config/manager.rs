//! Persistence for the registry document and application settings.
//!
//! Both documents are plain pretty-printed JSON in the application
//! config directory. Every mutation is followed by a full-document
//! write-back; writes are plain overwrites, not atomic renames, so a
//! crash mid-write can corrupt the store. That is a known limitation of
//! the format, matched here rather than silently fixed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::settings::AppSettings;
use crate::error::{DocumentError, DocumentResult};
use crate::registry::RegistryDocument;

/// File name of the registry document inside the config directory.
const REGISTRY_FILE: &str = "starter.json";
/// File name of the settings document inside the config directory.
const SETTINGS_FILE: &str = "settings.json";

/// Loads and saves the two persisted JSON documents.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager rooted at the given directory, or at the
    /// platform config directory (`<config>/ibstarter`) when `None`.
    #[must_use]
    pub fn new(config_dir: Option<&Path>) -> Self {
        let config_dir = config_dir.map_or_else(
            || {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("ibstarter")
            },
            Path::to_path_buf,
        );
        Self { config_dir }
    }

    /// The directory holding both documents.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the registry document.
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.config_dir.join(REGISTRY_FILE)
    }

    /// Path of the settings document.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Loads the registry document.
    ///
    /// A missing file yields the empty default document. Malformed
    /// content propagates as [`DocumentError::Parse`] — without a
    /// readable registry there is nothing to present.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] on read failure or malformed JSON.
    pub fn load_registry(&self) -> DocumentResult<RegistryDocument> {
        let path = self.registry_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no registry document, starting empty");
            return Ok(RegistryDocument::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| DocumentError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DocumentError::Parse { path, source })
    }

    /// Saves the whole registry document, overwriting the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] on write failure; save failures are
    /// fatal to the operation that triggered them.
    pub fn save_registry(&self, document: &RegistryDocument) -> DocumentResult<()> {
        self.write_json(&self.registry_path(), document)
    }

    /// Loads the application settings.
    ///
    /// A missing file yields the bootstrap settings (probing the
    /// platform-convention import path).
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] on read failure or malformed JSON.
    pub fn load_settings(&self) -> DocumentResult<AppSettings> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(AppSettings::bootstrap());
        }
        let content = fs::read_to_string(&path).map_err(|source| DocumentError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DocumentError::Parse { path, source })
    }

    /// Saves the application settings.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] on write failure.
    pub fn save_settings(&self, settings: &AppSettings) -> DocumentResult<()> {
        self.write_json(&self.settings_path(), settings)
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> DocumentResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| DocumentError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        // Pretty JSON keeps the store hand-editable
        let content = serde_json::to_string_pretty(value).map_err(|source| {
            DocumentError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, content).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "document saved");
        Ok(())
    }
}
