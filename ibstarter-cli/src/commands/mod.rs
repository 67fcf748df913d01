//! Command handlers and dispatch.

mod add;
mod delete;
mod favorite;
mod import;
mod launch;
mod list;
mod platforms;
mod settings;
mod version;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Routes a parsed command to its handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::List => list::cmd_list(config_path),
        Commands::Add {
            name,
            file,
            server,
            reference,
            url,
            platform,
            group,
            user,
            password,
            os_auth,
        } => add::cmd_add(
            config_path,
            add::AddRequest {
                name,
                file,
                server,
                reference,
                url,
                platform,
                group,
                user,
                password,
                os_auth,
            },
        ),
        Commands::Delete { name } => delete::cmd_delete(config_path, &name),
        Commands::Favorite { name, remove } => favorite::cmd_favorite(config_path, &name, remove),
        Commands::AssignVersion { name, version } => {
            version::cmd_assign_version(config_path, &name, &version)
        }
        Commands::Platforms => platforms::cmd_platforms(),
        Commands::Import { files } => import::cmd_import(config_path, &files),
        Commands::Launch {
            name,
            mode,
            dry_run,
        } => launch::cmd_launch(config_path, &name, mode.into(), dry_run),
        Commands::Settings { action } => settings::cmd_settings(config_path, action),
    }
}
