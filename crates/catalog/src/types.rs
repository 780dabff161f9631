use memotree_outline::Outline;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Full project structure: folder-relative-path → file name → entry.
///
/// BTreeMap keys keep folder and file iteration sorted, so rendering the
/// catalog needs no extra sort pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub folders: BTreeMap<String, BTreeMap<String, FileEntry>>,
}

/// One scanned source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Extracted declaration outline; empty when extraction failed
    pub outline: Outline,
    /// Absolute, canonicalized path of the file
    pub path: PathBuf,
    /// Extraction failure message, if the file did not parse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl Catalog {
    /// Insert a file entry under its folder key
    pub fn insert(&mut self, folder: String, file_name: String, entry: FileEntry) {
        self.folders.entry(folder).or_default().insert(file_name, entry);
    }

    /// Total number of files across all folders
    pub fn file_count(&self) -> usize {
        self.folders.values().map(BTreeMap::len).sum()
    }

    /// Number of files whose extraction failed
    pub fn diagnostic_count(&self) -> usize {
        self.folders
            .values()
            .flat_map(BTreeMap::values)
            .filter(|entry| entry.diagnostic.is_some())
            .count()
    }
}
