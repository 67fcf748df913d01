//! Delete an infobase everywhere it occurs.

use std::path::Path;

use crate::error::CliError;
use crate::util::{find_identity, load_registry};

/// Delete command handler
pub fn cmd_delete(config_path: Option<&Path>, name: &str) -> Result<(), CliError> {
    let (manager, mut document) = load_registry(config_path)?;

    let identity = find_identity(&document, name)?;
    let removed = document.remove_entry(&identity);
    manager.save_registry(&document)?;

    println!("Deleted '{identity}' ({removed} occurrence(s))");

    Ok(())
}
