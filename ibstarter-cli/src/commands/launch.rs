//! Launch an infobase.

use std::path::Path;

use ibstarter_core::launch::{LaunchMode, Launcher, SystemSpawner};
use ibstarter_core::models::EntryField;
use ibstarter_core::platform::InstalledPlatforms;

use crate::error::CliError;
use crate::util::{find_identity, load_registry};

/// Launch command handler
pub fn cmd_launch(
    config_path: Option<&Path>,
    name: &str,
    mode: LaunchMode,
    dry_run: bool,
) -> Result<(), CliError> {
    let (manager, mut document) = load_registry(config_path)?;
    let identity = find_identity(&document, name)?;

    let launcher = Launcher::new(InstalledPlatforms::new(), SystemSpawner);

    if dry_run {
        let command = launcher.prepare(&document, Some(&identity), mode)?;
        println!("{command}");
        return Ok(());
    }

    let command = launcher.launch(&document, Some(&identity), mode)?;
    println!("Launched '{identity}' in {mode} mode");
    tracing::debug!(%command, "spawned");

    // Advisory only; the launch already succeeded if we got here
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    document.update_field(&identity, EntryField::LastRun, &stamp);
    manager.save_registry(&document)?;

    Ok(())
}
