//! Assign a platform version across the registry.

use std::path::Path;

use ibstarter_core::models::EntryField;

use crate::error::CliError;
use crate::util::{find_identity, load_registry};

/// Assign-version command handler
pub fn cmd_assign_version(
    config_path: Option<&Path>,
    name: &str,
    version: &str,
) -> Result<(), CliError> {
    let (manager, mut document) = load_registry(config_path)?;

    let identity = find_identity(&document, name)?;
    let updated = document.update_field(&identity, EntryField::Platform, version);
    manager.save_registry(&document)?;

    println!("Assigned version {version} to {updated} occurrence(s) of '{identity}'");

    Ok(())
}
