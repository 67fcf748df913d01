//! Application settings persisted alongside the registry document.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User-editable application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Foreign registry files auto-imported on startup
    #[serde(default)]
    pub v8i_paths: Vec<PathBuf>,
}

impl AppSettings {
    /// Settings used when no settings file exists yet: the
    /// platform-convention registry location if it is present on disk,
    /// otherwise no import paths at all.
    #[must_use]
    pub fn bootstrap() -> Self {
        Self {
            v8i_paths: default_v8i_path().filter(|p| p.exists()).into_iter().collect(),
        }
    }

    /// Adds an import path unless it is already listed. Returns whether
    /// the list changed.
    pub fn add_v8i_path(&mut self, path: PathBuf) -> bool {
        if self.v8i_paths.contains(&path) {
            return false;
        }
        self.v8i_paths.push(path);
        true
    }

    /// Removes an import path. Returns whether the list changed.
    pub fn remove_v8i_path(&mut self, path: &PathBuf) -> bool {
        let before = self.v8i_paths.len();
        self.v8i_paths.retain(|p| p != path);
        self.v8i_paths.len() != before
    }
}

/// The platform-convention location of the shared infobase registry
/// (`<config>/1C/1CEStart/ibases.v8i`), when a config directory exists.
#[must_use]
pub fn default_v8i_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("1C").join("1CEStart").join("ibases.v8i"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_path_deduplicates() {
        let mut settings = AppSettings::default();
        assert!(settings.add_v8i_path(PathBuf::from("/tmp/a.v8i")));
        assert!(!settings.add_v8i_path(PathBuf::from("/tmp/a.v8i")));
        assert_eq!(settings.v8i_paths.len(), 1);
    }

    #[test]
    fn remove_missing_path_reports_no_change() {
        let mut settings = AppSettings::default();
        assert!(!settings.remove_v8i_path(&PathBuf::from("/tmp/a.v8i")));
    }

    #[test]
    fn settings_round_trip() {
        let mut settings = AppSettings::default();
        settings.add_v8i_path(PathBuf::from("/tmp/bases.v8i"));
        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
