//! CLI error types and exit codes.

use ibstarter_core::error::{DocumentError, ImportError, LaunchError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or import errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Launch failure - the selected infobase could not be started
    pub const LAUNCH_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Registry or settings document failure
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Import failure
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Launch failure
    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),

    /// No infobase matched the given name
    #[error("Infobase not found: {0}")]
    NotFound(String),

    /// Invalid command-line input
    #[error("Invalid input: {0}")]
    Input(String),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Launch(_) => exit_codes::LAUNCH_FAILURE,
            Self::Document(_) | Self::Import(_) | Self::NotFound(_) | Self::Input(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
