//! ibstarter Core Library
//!
//! This crate provides the core functionality for the ibstarter infobase
//! launcher: the registry document model, connection-string codec,
//! `.v8i` import engine, platform discovery, and launch orchestration.
//!
//! # Crate Structure
//!
//! - [`models`] - Core data structures (entries, groups, the registry tree)
//! - [`connect`] - Connection-string codec (file, server, web service)
//! - [`registry`] - The registry document and its tree operations
//! - [`config`] - Document persistence and application settings
//! - [`import`] - `.v8i` foreign registry importer
//! - [`platform`] - Installed platform version discovery
//! - [`launch`] - Command-line builder and launcher orchestration
//! - [`error`] - Error taxonomy shared across the crate

#![warn(missing_docs)]

pub mod config;
pub mod connect;
pub mod error;
pub mod import;
pub mod launch;
pub mod models;
pub mod platform;
pub mod registry;

// =============================================================================
// Convenience re-exports
//
// Flat re-exports for frontends and tests; new code should prefer the
// modular paths (e.g. `ibstarter_core::models::BaseEntry`).
// =============================================================================

pub use config::{AppSettings, ConfigManager, default_v8i_path};
pub use connect::ConnectString;
pub use error::{
    DocumentError, DocumentResult, ImportError, LaunchError, LaunchResult, StarterError,
};
pub use import::{
    ImportReport, ImportedBase, V8I_IMPORT_GROUP, import_all, merge_file_into, merge_into,
    parse_v8i, read_v8i_file,
};
pub use launch::{
    LaunchCommand, LaunchMode, Launcher, ProcessSpawner, SystemSpawner, build_launch_args,
    select_credentials,
};
pub use models::{
    AuthMode, AuthPair, BaseEntry, EntryField, EntryIdentity, Group, InterfaceKind, Node,
};
pub use platform::{InstalledPlatforms, PlatformResolver};
pub use registry::{DEFAULT_GROUP_NAME, RegistryDocument};
