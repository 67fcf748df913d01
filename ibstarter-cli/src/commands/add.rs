//! Register a new infobase.

use std::path::Path;

use ibstarter_core::connect::ConnectString;
use ibstarter_core::models::{AuthMode, AuthPair, BaseEntry};

use crate::error::CliError;
use crate::util::load_registry;

/// Parsed registration input.
pub struct AddRequest {
    pub name: String,
    pub file: Option<String>,
    pub server: Option<String>,
    pub reference: Option<String>,
    pub url: Option<String>,
    pub platform: String,
    pub group: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub os_auth: bool,
}

impl AddRequest {
    fn connect(&self) -> Result<String, CliError> {
        let descriptor = if let Some(path) = &self.file {
            ConnectString::File { path: path.clone() }
        } else if let Some(server) = &self.server {
            ConnectString::Server {
                server: server.clone(),
                reference: self.reference.clone().unwrap_or_default(),
            }
        } else if let Some(url) = &self.url {
            ConnectString::WebService { url: url.clone() }
        } else {
            return Err(CliError::Input(
                "one of --file, --server, or --url is required".to_string(),
            ));
        };
        Ok(descriptor.encode())
    }
}

/// Add command handler
pub fn cmd_add(config_path: Option<&Path>, request: AddRequest) -> Result<(), CliError> {
    let (manager, mut document) = load_registry(config_path)?;

    let connect = request.connect()?;
    let username = request.user.clone().unwrap_or_default();
    let password = request.password.clone().unwrap_or_default();

    let entry = BaseEntry {
        name: request.name.clone(),
        platform: request.platform.clone(),
        connect: connect.clone(),
        auth_mode: if username.is_empty() {
            AuthMode::Auto
        } else {
            AuthMode::Manual
        },
        auth_os: request.os_auth,
        auth_enterprise: AuthPair::new(username.clone(), password.clone()),
        username,
        password,
        ..BaseEntry::default()
    };

    match &request.group {
        Some(path) => {
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            document.add_entry(&segments, entry);
        }
        // Without an explicit target, append to the first group, or to
        // the default registration group when none exists yet
        None => match document.groups.first_mut() {
            Some(first) => first.add_entry_at(&[], entry),
            None => document.add_entry(&[], entry),
        },
    }

    manager.save_registry(&document)?;
    println!("Registered '{}' ({connect})", request.name);

    Ok(())
}
