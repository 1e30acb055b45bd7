//! Category scan report and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::category::CountResult;
use crate::error::ScanWarning;

/// Traversal statistics gathered alongside the category counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Directories whose children were listed (including the root).
    pub dirs_scanned: u64,
    /// Non-directory entries seen.
    pub files_seen: u64,
    /// Files that matched some category.
    pub files_matched: u64,
    /// Deepest level reached, the root being 0.
    pub max_depth: u32,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a listed directory at `depth`.
    pub fn record_dir(&mut self, depth: u32) {
        self.dirs_scanned += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a file, `matched` if some category claimed it.
    pub fn record_file(&mut self, matched: bool) {
        self.files_seen += 1;
        if matched {
            self.files_matched += 1;
        }
    }

    /// Files that no category claimed.
    pub fn files_unmatched(&self) -> u64 {
        self.files_seen - self.files_matched
    }
}

/// The single result delivered at the end of a category scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    /// Root path that was scanned.
    pub root: PathBuf,

    /// Per-category counts.
    pub counts: CountResult,

    /// Traversal statistics.
    pub stats: ScanStats,

    /// When the scan started.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Non-fatal problems encountered below the root.
    pub warnings: Vec<ScanWarning>,
}

impl CategoryReport {
    /// Create a new report.
    pub fn new(
        root: PathBuf,
        counts: CountResult,
        stats: ScanStats,
        scanned_at: SystemTime,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root,
            counts,
            stats,
            scanned_at,
            scan_duration,
            warnings,
        }
    }

    /// Take the counts, discarding the rest of the report.
    pub fn into_counts(self) -> CountResult {
        self.counts
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
