//! Show or edit application settings.

use std::path::Path;

use ibstarter_core::config::ConfigManager;

use crate::cli::SettingsAction;
use crate::error::CliError;
use crate::util::expand_path;

/// Settings command handler
pub fn cmd_settings(config_path: Option<&Path>, action: SettingsAction) -> Result<(), CliError> {
    let manager = ConfigManager::new(config_path);
    let mut settings = manager.load_settings()?;

    match action {
        SettingsAction::Show => {
            if settings.v8i_paths.is_empty() {
                println!("No .v8i import paths configured");
            }
            for path in &settings.v8i_paths {
                println!("{}", path.display());
            }
        }
        SettingsAction::AddPath { path } => {
            let path = expand_path(&path);
            if settings.add_v8i_path(path.clone()) {
                manager.save_settings(&settings)?;
                println!("Added {}", path.display());
            } else {
                println!("{} is already configured", path.display());
            }
        }
        SettingsAction::RemovePath { path } => {
            let path = expand_path(&path);
            if settings.remove_v8i_path(&path) {
                manager.save_settings(&settings)?;
                println!("Removed {}", path.display());
            } else {
                println!("{} was not configured", path.display());
            }
        }
    }

    Ok(())
}
