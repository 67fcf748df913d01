//! Error types for the ibstarter core library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving a persisted JSON document
/// (the infobase registry or the application settings).
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Underlying filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Document location
        path: PathBuf,
        /// Originating I/O error
        source: std::io::Error,
    },

    /// The persisted content is not valid JSON for the expected schema.
    ///
    /// Not recovered: a malformed registry means the process cannot
    /// present one, so the error propagates to the caller.
    #[error("malformed document {path}: {source}")]
    Parse {
        /// Document location
        path: PathBuf,
        /// Originating deserialization error
        source: serde_json::Error,
    },
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised while importing a foreign registry file.
///
/// In batch imports these are logged and the offending file is skipped;
/// they never abort the remaining files.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read from disk
    #[error("failed to read {path}: {source}")]
    Io {
        /// Source file location
        path: PathBuf,
        /// Originating I/O error
        source: std::io::Error,
    },

    /// The file decoded in neither of the candidate text encodings
    #[error("failed to decode {path} as UTF-8 or cp1251")]
    Encoding {
        /// Source file location
        path: PathBuf,
    },
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors raised by a single launch attempt.
///
/// All variants are terminal for that one operation and user-visible;
/// none corrupt persisted state and none are retried automatically.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No entry was selected, or the selection is a group
    #[error("no infobase selected")]
    NoSelection,

    /// The selected entry has an empty connection string
    #[error("the selected infobase has no connection string")]
    MissingConnection,

    /// Neither the entry nor any ancestor group defines a platform version
    #[error("no platform version set for the selected infobase")]
    MissingPlatform,

    /// No installed executable matches the resolved platform version
    #[error("no executable found for platform {0}")]
    ExecutableNotFound(String),

    /// The external process failed to start
    #[error("failed to start process: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result type for launch operations
pub type LaunchResult<T> = Result<T, LaunchError>;

/// Umbrella error for callers that mix concerns (CLI, embedding UIs).
#[derive(Debug, Error)]
pub enum StarterError {
    /// Registry or settings document failure
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Foreign registry import failure
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Launch failure
    #[error(transparent)]
    Launch(#[from] LaunchError),
}
