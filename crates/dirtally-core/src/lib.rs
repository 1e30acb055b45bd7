//! Core types and traits for dirtally.
//!
//! This crate provides the fundamental data structures used throughout
//! dirtally, including directory entries, extension categories, scan
//! reports, navigation state and configuration.

mod category;
mod config;
mod entry;
mod error;
pub mod format;
mod navigation;
mod report;

pub use category::{CategoryMap, CountResult, ExtensionRule, normalize_extension};
pub use config::{ScanConfig, ScanConfigBuilder};
pub use entry::{FileEntry, is_hidden_name};
pub use error::{BrowseError, CategoryError, ScanError, ScanWarning, WarningKind};
pub use navigation::PathStack;
pub use report::{CategoryReport, ScanStats};
