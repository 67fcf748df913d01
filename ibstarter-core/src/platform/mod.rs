//! Discovery of installed platform versions and their executables.
//!
//! Installations live under `<Program Files>/1cv8/<version>/bin`; both
//! the 64-bit and 32-bit roots are scanned. The launcher depends only on
//! the [`PlatformResolver`] trait so tests can substitute a fake.

use std::fs;
use std::path::{Path, PathBuf};

/// Maps platform version identifiers to installed executables.
pub trait PlatformResolver {
    /// Sorted distinct set of version identifiers found on disk.
    fn installed_versions(&self) -> Vec<String>;

    /// Absolute path of the launcher executable for a version, or
    /// `None` when that version is not installed.
    fn resolve_executable(&self, version: &str) -> Option<PathBuf>;
}

/// Disk-scanning resolver over the standard installation roots.
#[derive(Debug, Clone)]
pub struct InstalledPlatforms {
    roots: Vec<PathBuf>,
}

/// The thin-client binary, preferred when present.
const CLIENT_EXE: &str = "1cv8c.exe";
/// The full launcher binary, the fallback.
const FULL_EXE: &str = "1cv8.exe";

impl InstalledPlatforms {
    /// Creates a resolver over the standard Program Files roots.
    #[must_use]
    pub fn new() -> Self {
        let program_files =
            std::env::var("PROGRAMFILES").unwrap_or_else(|_| "C:\\Program Files".to_string());
        let program_files_x86 = std::env::var("PROGRAMFILES(X86)")
            .unwrap_or_else(|_| "C:\\Program Files (x86)".to_string());
        Self::with_roots(vec![
            PathBuf::from(program_files).join("1cv8"),
            PathBuf::from(program_files_x86).join("1cv8"),
        ])
    }

    /// Creates a resolver over explicit installation roots.
    #[must_use]
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    fn bin_dir(root: &Path, version: &str) -> PathBuf {
        root.join(version).join("bin")
    }
}

impl Default for InstalledPlatforms {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformResolver for InstalledPlatforms {
    fn installed_versions(&self) -> Vec<String> {
        let mut versions = Vec::new();
        for root in &self.roots {
            let Ok(entries) = fs::read_dir(root) else {
                continue;
            };
            for entry in entries.flatten() {
                let name = entry.file_name();
                let Some(version) = name.to_str() else {
                    continue;
                };
                if Self::bin_dir(root, version).join(FULL_EXE).exists() {
                    versions.push(version.to_string());
                }
            }
        }
        versions.sort();
        versions.dedup();
        versions
    }

    fn resolve_executable(&self, version: &str) -> Option<PathBuf> {
        for root in &self.roots {
            let bin = Self::bin_dir(root, version);
            for exe in [CLIENT_EXE, FULL_EXE] {
                let candidate = bin.join(exe);
                if candidate.exists() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}
