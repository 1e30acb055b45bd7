//! Browsing session built on a path stack.

use std::sync::Arc;

use dirtally_core::{BrowseError, CategoryMap, FileEntry, PathStack, ScanConfig};

use crate::scanner::{CategoryScanner, ScanHandle};
use crate::sort::{SortKey, list_and_sort};

/// One browsing session: a current directory plus listing preferences.
///
/// Each session owns its own [`PathStack`], so several sessions can browse
/// independently.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: PathStack,
    /// Show hidden entries in listings.
    pub include_hidden: bool,
    /// Ordering applied to listings.
    pub sort_key: SortKey,
    /// Largest files first when sorting by size.
    pub descending: bool,
}

impl Navigator {
    /// Start a session at `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            stack: PathStack::new(root),
            include_hidden: false,
            sort_key: SortKey::Name,
            descending: false,
        }
    }

    /// Set the listing order.
    pub fn with_sort(mut self, key: SortKey, descending: bool) -> Self {
        self.sort_key = key;
        self.descending = descending;
        self
    }

    /// The underlying path stack.
    pub fn stack(&self) -> &PathStack {
        &self.stack
    }

    /// The current directory.
    pub fn current_path(&self) -> String {
        self.stack.current_path()
    }

    /// List the current directory with the session's preferences.
    pub fn list(&self) -> Result<Vec<FileEntry>, BrowseError> {
        list_and_sort(
            &self.stack.current_dir(),
            self.include_hidden,
            self.sort_key,
            self.descending,
        )
    }

    /// Enter child directory `name` and list it.
    ///
    /// On failure the session stays where it was.
    pub fn enter(&mut self, name: &str) -> Result<Vec<FileEntry>, BrowseError> {
        self.stack.enter(name);
        match self.list() {
            Ok(entries) => Ok(entries),
            Err(err) => {
                // Undo the push; the stack had at least the root before it
                let _ = self.stack.pop_to_parent();
                Err(err)
            }
        }
    }

    /// Go to the parent directory and list it.
    pub fn up(&mut self) -> Result<Vec<FileEntry>, BrowseError> {
        self.stack.pop_to_parent()?;
        self.list()
    }

    /// Start a category scan of the current directory.
    pub fn scan_current(&self, scanner: &CategoryScanner, categories: Arc<CategoryMap>) -> ScanHandle {
        scanner.start(ScanConfig::new(self.stack.current_dir()), categories)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("photos/2017")).unwrap();
        fs::write(temp.path().join("photos/b.jpg"), "bb").unwrap();
        fs::write(temp.path().join("photos/a.jpg"), "a").unwrap();
        fs::write(temp.path().join("readme.txt"), "").unwrap();
        temp
    }

    fn root_of(temp: &TempDir) -> String {
        temp.path().to_string_lossy().to_string()
    }

    #[test]
    fn test_enter_and_up() {
        let temp = create_test_dir();
        let mut nav = Navigator::new(root_of(&temp));

        let entries = nav.enter("photos").unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["2017", "a.jpg", "b.jpg"]);
        assert_eq!(nav.stack().depth(), 1);

        let entries = nav.up().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(nav.stack().is_at_root());

        assert!(matches!(nav.up(), Err(BrowseError::InvalidStackState)));
    }

    #[test]
    fn test_enter_missing_directory_keeps_position() {
        let temp = create_test_dir();
        let mut nav = Navigator::new(root_of(&temp));

        assert!(matches!(nav.enter("nope"), Err(BrowseError::NotFound { .. })));
        assert_eq!(nav.current_path(), root_of(&temp));
    }

    #[test]
    fn test_sorted_listing() {
        let temp = create_test_dir();
        let mut nav = Navigator::new(root_of(&temp)).with_sort(SortKey::Size, true);
        let entries = nav.enter("photos").unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["2017", "b.jpg", "a.jpg"]);
    }
}
