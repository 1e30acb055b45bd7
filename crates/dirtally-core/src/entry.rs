//! Directory entry snapshots.

use std::fs::Metadata;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Check whether a file name denotes a hidden entry.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// A single child of a directory, captured at listing time.
///
/// The snapshot is not kept in sync with later filesystem changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File/directory name (not full path).
    pub name: CompactString,

    /// Full path of the entry.
    pub path: PathBuf,

    /// Whether the entry (or the target of a symlink) is a directory.
    pub is_dir: bool,

    /// Whether the entry itself is a symbolic link.
    pub is_symlink: bool,

    /// Size in bytes as reported by metadata.
    pub size: u64,

    /// Last modification time.
    pub modified: SystemTime,
}

impl FileEntry {
    /// Create a new file entry.
    pub fn new_file(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        size: u64,
        modified: SystemTime,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
            is_symlink: false,
            size,
            modified,
        }
    }

    /// Create a new directory entry.
    pub fn new_directory(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        modified: SystemTime,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: true,
            is_symlink: false,
            size: 0,
            modified,
        }
    }

    /// Build an entry from metadata.
    ///
    /// `metadata` should be the followed metadata for symlinks so that a link
    /// to a directory reports `is_dir`.
    pub fn from_metadata(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        metadata: &Metadata,
        is_symlink: bool,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: metadata.is_dir(),
            is_symlink,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
        }
    }

    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Check if this entry is not a directory.
    pub fn is_file(&self) -> bool {
        !self.is_dir
    }

    /// Check if this entry is hidden (name starts with `.`).
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_names() {
        assert!(is_hidden_name(".git"));
        assert!(is_hidden_name("."));
        assert!(!is_hidden_name("src"));
        assert!(!is_hidden_name("a.b"));
    }

    #[test]
    fn test_file_entry_creation() {
        let entry = FileEntry::new_file("test.txt", "/tmp/test.txt", 1024, SystemTime::now());
        assert!(entry.is_file());
        assert!(!entry.is_dir());
        assert!(!entry.is_hidden());
        assert_eq!(entry.size, 1024);
    }

    #[test]
    fn test_directory_entry_creation() {
        let entry = FileEntry::new_directory(".cache", "/tmp/.cache", SystemTime::now());
        assert!(entry.is_dir());
        assert!(entry.is_hidden());
        assert_eq!(entry.size, 0);
    }
}
