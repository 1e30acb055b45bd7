//! Extension categories and per-category tallies.

use std::collections::BTreeSet;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CategoryError;

/// How the classification extension is derived from a file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionRule {
    /// Everything after the first `.`, lower-cased.
    ///
    /// A name without a `.` yields the whole name, so `archive.tar.gz` gives
    /// `tar.gz` and `README` gives `readme`.
    #[default]
    FirstDot,
    /// Everything after the last `.`, lower-cased.
    ///
    /// Names without a `.` (or whose only `.` is the leading one) yield an
    /// empty extension.
    LastDot,
}

impl ExtensionRule {
    /// Derive the classification extension of `name`.
    pub fn extract(self, name: &str) -> String {
        match self {
            Self::FirstDot => match name.find('.') {
                Some(idx) => name[idx + 1..].to_lowercase(),
                None => name.to_lowercase(),
            },
            Self::LastDot => match name.rfind('.') {
                Some(idx) if idx > 0 => name[idx + 1..].to_lowercase(),
                _ => String::new(),
            },
        }
    }
}

/// Normalize a user supplied extension: trim, strip leading dots, lower-case.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Ordered mapping from category name to the extensions it claims.
///
/// Iteration order is insertion order and is the order in which categories
/// are tried during classification; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, Vec<String>>",
    into = "IndexMap<String, Vec<String>>"
)]
pub struct CategoryMap {
    categories: IndexMap<CompactString, BTreeSet<String>>,
}

impl CategoryMap {
    /// Create an empty category map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The categories a typical mobile file explorer groups by.
    pub fn default_categories() -> Self {
        let mut map = Self::new();
        map.insert("images", ["jpg", "jpeg", "png", "gif", "bmp", "webp"]);
        map.insert("video", ["mp4", "mkv", "avi", "3gp", "mov", "wmv", "flv"]);
        map.insert("audio", ["mp3", "wav", "flac", "aac", "ogg", "m4a", "amr"]);
        map.insert(
            "documents",
            ["txt", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "md"],
        );
        map.insert("archives", ["zip", "rar", "7z", "tar", "gz"]);
        map.insert("apk", ["apk"]);
        map
    }

    /// Add extensions to a category, creating it at the end if new.
    pub fn insert<I, S>(&mut self, category: impl Into<CompactString>, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = self.categories.entry(category.into()).or_default();
        set.extend(
            extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .filter(|ext| !ext.is_empty()),
        );
    }

    /// Add a category from a `NAME=ext,ext` definition.
    pub fn insert_definition(&mut self, definition: &str) -> Result<(), CategoryError> {
        let (name, extensions) =
            definition
                .split_once('=')
                .ok_or_else(|| CategoryError::Malformed {
                    input: definition.to_string(),
                })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        self.insert(name, extensions.split(','));
        Ok(())
    }

    /// Parse a JSON object of the form `{"images": ["jpg", "png"]}`.
    pub fn from_json_str(json: &str) -> Result<Self, CategoryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find the first category claiming `extension`.
    pub fn classify(&self, extension: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(_, extensions)| extensions.contains(extension))
            .map(|(name, _)| name.as_str())
    }

    /// Extensions registered for a category.
    pub fn extensions(&self, category: &str) -> Option<&BTreeSet<String>> {
        self.categories.get(category)
    }

    /// Iterate category names in classification order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(CompactString::as_str)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl From<IndexMap<String, Vec<String>>> for CategoryMap {
    fn from(raw: IndexMap<String, Vec<String>>) -> Self {
        let mut map = Self::new();
        for (name, extensions) in raw {
            map.insert(name, extensions);
        }
        map
    }
}

impl From<CategoryMap> for IndexMap<String, Vec<String>> {
    fn from(map: CategoryMap) -> Self {
        map.categories
            .into_iter()
            .map(|(name, extensions)| (name.to_string(), extensions.into_iter().collect()))
            .collect()
    }
}

/// Per-category file counts produced by a scan.
///
/// Every category of the map the result was created from is present, even
/// when nothing matched it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountResult {
    counts: IndexMap<CompactString, u64>,
}

impl CountResult {
    /// Create a result with every category of `categories` set to zero.
    pub fn zeroed(categories: &CategoryMap) -> Self {
        Self {
            counts: categories.names().map(|name| (name.into(), 0)).collect(),
        }
    }

    /// Add one file to `category`. Unknown categories are ignored.
    pub fn record(&mut self, category: &str) {
        if let Some(count) = self.counts.get_mut(category) {
            *count += 1;
        }
    }

    /// Count for a category, `None` if the category is unknown.
    pub fn get(&self, category: &str) -> Option<u64> {
        self.counts.get(category).copied()
    }

    /// Sum of all category counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(category, count)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of categories tracked.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no categories are tracked.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
