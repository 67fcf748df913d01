//! Import engine for foreign infobase registry files.
//!
//! The platform's own launcher keeps a shared registry of infobases in an
//! INI-like `.v8i` file. [`v8i`] parses that format and merges the
//! entries into the registry document, deduplicating by connection
//! string and materializing the `Folder` hierarchy as nested groups
//! under a dedicated import root.

mod v8i;

pub use v8i::{
    V8I_IMPORT_GROUP, ImportedBase, import_all, merge_file_into, merge_into, parse_v8i,
    read_v8i_file,
};

use std::path::PathBuf;

/// Outcome of a batch import run across several registry files.
///
/// One failing file never aborts the batch; it is recorded here and the
/// remaining files are still processed.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Entries added to the document across all files
    pub added: usize,
    /// Files read and merged successfully
    pub files: usize,
    /// Files that could not be read or decoded
    pub failed: Vec<PathBuf>,
}

impl ImportReport {
    /// Returns a one-line, user-facing summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Imported {} entries from {} file(s)", self.added, self.files)
        } else {
            format!(
                "Imported {} entries from {} file(s), {} file(s) failed",
                self.added,
                self.files,
                self.failed.len()
            )
        }
    }
}
