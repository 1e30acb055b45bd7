//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::category::ExtensionRule;

/// Configuration for a category scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root directory of the subtree to scan.
    pub root: PathBuf,

    /// Descend into directories reached through symbolic links.
    ///
    /// There is no cycle detection; a looping link makes the scan unbounded.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Include hidden entries (starting with .).
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Maximum depth to descend (None = unlimited, 0 = root only).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// How file extensions are derived for classification.
    #[builder(default)]
    #[serde(default)]
    pub extension_rule: ExtensionRule,
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            include_hidden: false,
            max_depth: None,
            extension_rule: ExtensionRule::FirstDot,
        }
    }

    /// Check if a directory at `depth` (root = 0) is within the depth limit.
    pub fn within_depth(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
