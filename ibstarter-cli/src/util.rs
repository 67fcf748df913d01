//! Shared helpers for command handlers.

use std::path::{Path, PathBuf};

use ibstarter_core::config::ConfigManager;
use ibstarter_core::models::EntryIdentity;
use ibstarter_core::registry::RegistryDocument;

use crate::error::CliError;

/// Opens the config manager and loads the registry document.
pub fn load_registry(
    config_path: Option<&Path>,
) -> Result<(ConfigManager, RegistryDocument), CliError> {
    let manager = ConfigManager::new(config_path);
    let document = manager.load_registry()?;
    Ok((manager, document))
}

/// Resolves a user-supplied name to an entry identity, favorites first,
/// then a depth-first walk of the group tree. The first match wins.
pub fn find_identity(document: &RegistryDocument, name: &str) -> Result<EntryIdentity, CliError> {
    document
        .search(name)
        .map(ibstarter_core::models::BaseEntry::identity)
        .ok_or_else(|| CliError::NotFound(name.to_string()))
}

/// Expands `~` in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}
