//! Filesystem layout of a memory root.

use std::path::{Path, PathBuf};

/// Default memory directory, relative to the root.
pub const DEFAULT_MEMORY_DIR: &str = "memory";
/// Default external template document, relative to the root.
pub const DEFAULT_TEMPLATE_PATH: &str = "skills/memory/MEMORY_TEMPLATE.md";
/// Extension shared by every day file.
pub const DAY_FILE_EXTENSION: &str = "md";

/// Resolved locations used by storage, search and template lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLayout {
    pub root: PathBuf,
    pub memory_dir: PathBuf,
    pub template_path: PathBuf,
    pub extension: String,
}

impl MemoryLayout {
    /// Creates the default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            memory_dir: root.join(DEFAULT_MEMORY_DIR),
            template_path: root.join(DEFAULT_TEMPLATE_PATH),
            extension: DAY_FILE_EXTENSION.to_string(),
            root,
        }
    }

    /// Returns the file name for a `YYYY-MM-DD` date.
    pub fn day_file_name(&self, date: &str) -> String {
        format!("{date}.{}", self.extension)
    }

    pub fn day_file_path(&self, date: &str) -> PathBuf {
        self.memory_dir.join(self.day_file_name(date))
    }

    /// Resolves `path` against the root unless it is already absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
