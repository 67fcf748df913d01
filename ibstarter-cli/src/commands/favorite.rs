//! Add or remove a favorites snapshot.

use std::path::Path;

use crate::error::CliError;
use crate::util::{find_identity, load_registry};

/// Favorite command handler
pub fn cmd_favorite(config_path: Option<&Path>, name: &str, remove: bool) -> Result<(), CliError> {
    let (manager, mut document) = load_registry(config_path)?;
    let identity = find_identity(&document, name)?;

    if remove {
        if document.remove_favorite(&identity) {
            manager.save_registry(&document)?;
            println!("Removed '{identity}' from favorites");
        } else {
            println!("'{identity}' is not in favorites");
        }
        return Ok(());
    }

    let entry = document
        .find_entry(&identity)
        .cloned()
        .ok_or_else(|| CliError::NotFound(name.to_string()))?;

    if document.add_favorite(&entry) {
        manager.save_registry(&document)?;
        println!("Added '{identity}' to favorites");
    } else {
        println!("'{identity}' is already in favorites");
    }

    Ok(())
}
