//! Scan progress reporting.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dirtally_core::ScanStats;

/// Progress information during a category scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Scan this update belongs to, see [`crate::ScanHandle::id`].
    pub scan_id: u64,
    /// Root of the scanned subtree.
    pub root: PathBuf,
    /// Number of directories listed so far.
    pub dirs_scanned: u64,
    /// Number of files seen so far.
    pub files_seen: u64,
    /// Number of files that matched a category.
    pub files_matched: u64,
    /// Directory most recently listed.
    pub current_path: PathBuf,
    /// Number of warnings encountered.
    pub warnings_count: u64,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
    /// Whether this is the final update of the scan.
    pub finished: bool,
}

impl ScanProgress {
    /// Build a snapshot from running statistics.
    pub(crate) fn snapshot(
        scan_id: u64,
        root: &Path,
        stats: &ScanStats,
        current_path: PathBuf,
        warnings_count: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            scan_id,
            root: root.to_path_buf(),
            dirs_scanned: stats.dirs_scanned,
            files_seen: stats.files_seen,
            files_matched: stats.files_matched,
            current_path,
            warnings_count: warnings_count as u64,
            elapsed,
            finished: false,
        }
    }
}
