//! Directory listing, sorting and category scanning for dirtally.
//!
//! # Overview
//!
//! `dirtally-scan` is responsible for reading the filesystem:
//!
//! - **Listing** one directory level, optionally without hidden entries
//! - **Sorting** a listing by name, size or modification time
//! - **Category scans** that walk a whole subtree breadth-first and count
//!   files per extension category, off the caller's thread
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dirtally_scan::{SortKey, list_and_sort};
//!
//! let entries = list_and_sort(Path::new("/sdcard"), false, SortKey::Name, false).unwrap();
//! for entry in &entries {
//!     println!("{}", entry.name);
//! }
//! ```
//!
//! # Category Scans
//!
//! The report is delivered exactly once, or never if the root is invalid:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dirtally_scan::{CategoryMap, CategoryScanner};
//!
//! let scanner = CategoryScanner::new();
//! let categories = Arc::new(CategoryMap::default_categories());
//!
//! scanner.scan_categories("/sdcard", categories, |report| {
//!     for (category, count) in report.counts.iter() {
//!         println!("{category}: {count}");
//!     }
//! });
//! ```

mod lister;
mod navigator;
mod progress;
mod scanner;
mod sort;

pub use lister::{list_entries, stat_entry};
pub use navigator::Navigator;
pub use progress::ScanProgress;
pub use scanner::{
    CategoryScanner, PROGRESS_CHANNEL_SIZE, PROGRESS_INTERVAL, ScanHandle, validate_root,
};
pub use sort::{
    SortKey, compare_by_modified, compare_by_name, compare_by_size, compare_names, list_and_sort,
    sort_entries,
};

// Re-export core types for convenience
pub use dirtally_core::{
    BrowseError, CategoryMap, CategoryReport, CountResult, ExtensionRule, FileEntry, PathStack,
    ScanConfig, ScanError, ScanStats, ScanWarning, WarningKind,
};
pub use tokio_util::sync::CancellationToken;
