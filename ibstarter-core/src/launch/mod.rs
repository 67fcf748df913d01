//! Launcher orchestration: selection to spawned process.
//!
//! A launch walks a fixed sequence — selection check, platform
//! resolution (with group inheritance), executable resolution, command
//! construction, spawn — and every step either advances or returns a
//! terminal [`LaunchError`]. The spawned process is not tracked: no
//! handle is retained and no exit code observed. The external tool runs
//! its own long, independent lifetime.

mod command;

pub use command::{LaunchMode, build_launch_args, select_credentials};

use std::path::PathBuf;
use std::process::Command;

use crate::error::{LaunchError, LaunchResult};
use crate::models::EntryIdentity;
use crate::platform::PlatformResolver;
use crate::registry::RegistryDocument;

/// A fully resolved launch: executable plus argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    /// Absolute path of the platform executable
    pub program: PathBuf,
    /// Ordered arguments, mode tokens first
    pub args: Vec<String>,
}

impl std::fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Hands a resolved command to the operating system.
pub trait ProcessSpawner {
    /// Starts the process, detached.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the process cannot start.
    fn spawn(&self, command: &LaunchCommand) -> std::io::Result<()>;
}

/// Spawner backed by [`std::process::Command`]. The child handle is
/// dropped immediately: launched programs are fire-and-forget.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, command: &LaunchCommand) -> std::io::Result<()> {
        Command::new(&command.program)
            .args(&command.args)
            .spawn()
            .map(drop)
    }
}

/// Ties selection, inherited-attribute resolution, command building,
/// and process spawning together for a single launch invocation.
#[derive(Debug)]
pub struct Launcher<R, S> {
    resolver: R,
    spawner: S,
}

impl<R: PlatformResolver, S: ProcessSpawner> Launcher<R, S> {
    /// Creates a launcher over the given collaborators.
    pub const fn new(resolver: R, spawner: S) -> Self {
        Self { resolver, spawner }
    }

    /// Resolves a selection into a runnable command without spawning it.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::NoSelection`] when nothing (or a group) is
    /// selected, [`LaunchError::MissingConnection`] or
    /// [`LaunchError::MissingPlatform`] when the entry is incomplete
    /// after the ancestor walk, and [`LaunchError::ExecutableNotFound`]
    /// when no installation matches the resolved platform.
    pub fn prepare(
        &self,
        document: &RegistryDocument,
        selection: Option<&EntryIdentity>,
        mode: LaunchMode,
    ) -> LaunchResult<LaunchCommand> {
        let identity = selection.ok_or(LaunchError::NoSelection)?;
        let entry = document
            .find_entry(identity)
            .ok_or(LaunchError::NoSelection)?;

        if entry.connect.is_empty() {
            return Err(LaunchError::MissingConnection);
        }

        let platform = document.resolve_platform(identity).unwrap_or_default();
        if platform.is_empty() {
            return Err(LaunchError::MissingPlatform);
        }

        let program = self
            .resolver
            .resolve_executable(&platform)
            .ok_or_else(|| LaunchError::ExecutableNotFound(platform.clone()))?;

        let credentials = select_credentials(entry, mode);
        let args = build_launch_args(&entry.connect, mode, &credentials, entry.auth_os);

        Ok(LaunchCommand { program, args })
    }

    /// Resolves and spawns in one step, returning the command that ran.
    ///
    /// Success means the process started; nothing beyond that is
    /// observed or retried.
    ///
    /// # Errors
    ///
    /// Returns every error [`Self::prepare`] can, plus
    /// [`LaunchError::Spawn`] when the process fails to start.
    pub fn launch(
        &self,
        document: &RegistryDocument,
        selection: Option<&EntryIdentity>,
        mode: LaunchMode,
    ) -> LaunchResult<LaunchCommand> {
        let command = self.prepare(document, selection, mode)?;
        tracing::info!(program = %command.program.display(), %mode, "launching infobase");
        self.spawner.spawn(&command)?;
        Ok(command)
    }
}
