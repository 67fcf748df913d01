//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ibstarter_core::launch::LaunchMode;

/// ibstarter command-line interface for managing and launching infobases
#[derive(Parser)]
#[command(name = "ibstarter")]
#[command(author, version, about = "ibstarter command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the registry tree
    #[command(about = "List favorites and the infobase group tree")]
    List,

    /// Register a new infobase
    #[command(about = "Register a new infobase in the registry")]
    Add {
        /// Display name for the new infobase
        #[arg(short, long)]
        name: String,

        /// File infobase directory
        #[arg(short, long, group = "kind")]
        file: Option<String>,

        /// Application server address (requires --reference)
        #[arg(short, long, group = "kind", requires = "reference")]
        server: Option<String>,

        /// Database reference on the server
        #[arg(short, long)]
        reference: Option<String>,

        /// Web-service publication URL
        #[arg(short = 'w', long, group = "kind")]
        url: Option<String>,

        /// Platform version (empty inherits from the target group)
        #[arg(short, long, default_value = "")]
        platform: String,

        /// Target group path, `/`-separated (defaults to the first group)
        #[arg(short, long)]
        group: Option<String>,

        /// Username for manual authentication
        #[arg(short = 'u', long)]
        user: Option<String>,

        /// Password for manual authentication
        #[arg(short = 'P', long)]
        password: Option<String>,

        /// Use operating-system authentication
        #[arg(long)]
        os_auth: bool,
    },

    /// Delete an infobase everywhere it occurs
    #[command(about = "Delete an infobase from favorites and all groups")]
    Delete {
        /// Infobase name (first match wins)
        name: String,
    },

    /// Manage the favorites list
    #[command(about = "Add or remove a favorites snapshot of an infobase")]
    Favorite {
        /// Infobase name (first match wins)
        name: String,

        /// Remove the snapshot instead of adding one
        #[arg(long)]
        remove: bool,
    },

    /// Assign a platform version to every occurrence of an infobase
    #[command(about = "Assign a platform version across the registry")]
    #[command(disable_version_flag = true)]
    AssignVersion {
        /// Infobase name (first match wins)
        name: String,

        /// Platform version identifier, e.g. 8.3.20.1549
        version: String,
    },

    /// List installed platform versions
    #[command(about = "List platform versions installed on this machine")]
    Platforms,

    /// Import infobases from .v8i registry files
    #[command(about = "Import infobases from .v8i registry files")]
    Import {
        /// Files to import; defaults to the configured import paths
        files: Vec<PathBuf>,
    },

    /// Launch an infobase
    #[command(about = "Launch an infobase with the resolved platform")]
    Launch {
        /// Infobase name (first match wins)
        name: String,

        /// Session kind to start
        #[arg(short, long, default_value = "enterprise", value_enum)]
        mode: ModeArg,

        /// Print the command line without starting the process
        #[arg(long)]
        dry_run: bool,
    },

    /// Show or edit application settings
    #[command(about = "Show or edit the configured .v8i import paths")]
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Session kind argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// A regular user session
    Enterprise,
    /// The configurator
    Configurator,
    /// Enterprise session with the debug console
    Test,
}

impl From<ModeArg> for LaunchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Enterprise => Self::Enterprise,
            ModeArg::Configurator => Self::Configurator,
            ModeArg::Test => Self::Test,
        }
    }
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show,
    /// Add a .v8i import path
    AddPath {
        /// File to add (tilde-expanded)
        path: String,
    },
    /// Remove a .v8i import path
    RemovePath {
        /// File to remove (tilde-expanded)
        path: String,
    },
}
