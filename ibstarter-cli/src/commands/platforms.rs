//! List installed platform versions.

use ibstarter_core::platform::{InstalledPlatforms, PlatformResolver};

use crate::error::CliError;

/// Platforms command handler
pub fn cmd_platforms() -> Result<(), CliError> {
    let versions = InstalledPlatforms::new().installed_versions();

    if versions.is_empty() {
        println!("No platform installations found");
        return Ok(());
    }
    for version in versions {
        println!("{version}");
    }

    Ok(())
}
