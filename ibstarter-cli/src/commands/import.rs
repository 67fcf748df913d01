//! Import infobases from `.v8i` registry files.

use std::path::{Path, PathBuf};

use ibstarter_core::import::import_all;

use crate::error::CliError;
use crate::util::load_registry;

/// Import command handler
pub fn cmd_import(config_path: Option<&Path>, files: &[PathBuf]) -> Result<(), CliError> {
    let (manager, mut document) = load_registry(config_path)?;

    let paths = if files.is_empty() {
        let settings = manager.load_settings()?;
        if settings.v8i_paths.is_empty() {
            println!("No .v8i files given and none configured");
            return Ok(());
        }
        settings.v8i_paths
    } else {
        files.to_vec()
    };

    let report = import_all(&mut document, &paths);
    manager.save_registry(&document)?;

    println!("{}", report.summary());
    for path in &report.failed {
        println!("  failed: {}", path.display());
    }

    Ok(())
}
