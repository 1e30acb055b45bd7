//! Orderings for listed directory entries.
//!
//! Every comparator is total: when the primary keys are equal the entries
//! are ordered by case-folded name and then by raw name, so repeated sorts
//! of the same input always agree.

use std::cmp::Ordering;
use std::path::Path;

use dirtally_core::{BrowseError, FileEntry};

use crate::lister::list_entries;

/// Key used to order a directory listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Directories first, then case-insensitive name.
    #[default]
    Name,
    /// Directories first (by name), then files by byte length.
    Size,
    /// Directories first, then newest modification time first.
    Modified,
}

/// Compare names case-insensitively, falling back to the raw name.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

fn directories_first(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.is_dir.cmp(&a.is_dir)
}

/// Directories before files, each group by case-insensitive name.
pub fn compare_by_name(a: &FileEntry, b: &FileEntry) -> Ordering {
    directories_first(a, b).then_with(|| compare_names(&a.name, &b.name))
}

/// Directories (by name) before files; files by size.
///
/// Equal sizes are broken by ascending name in both directions.
pub fn compare_by_size(a: &FileEntry, b: &FileEntry, descending: bool) -> Ordering {
    directories_first(a, b)
        .then_with(|| {
            if a.is_dir {
                return Ordering::Equal;
            }
            let by_size = a.size.cmp(&b.size);
            if descending { by_size.reverse() } else { by_size }
        })
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Directories before files; within a kind, newest first.
pub fn compare_by_modified(a: &FileEntry, b: &FileEntry) -> Ordering {
    directories_first(a, b)
        .then_with(|| b.modified.cmp(&a.modified))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Sort entries in place with a stable sort.
///
/// `descending` only affects [`SortKey::Size`].
pub fn sort_entries(entries: &mut [FileEntry], key: SortKey, descending: bool) {
    match key {
        SortKey::Name => entries.sort_by(compare_by_name),
        SortKey::Size => entries.sort_by(|a, b| compare_by_size(a, b, descending)),
        SortKey::Modified => entries.sort_by(compare_by_modified),
    }
}

/// List the children of `path` and return them in `key` order.
pub fn list_and_sort(
    path: &Path,
    include_hidden: bool,
    key: SortKey,
    descending: bool,
) -> Result<Vec<FileEntry>, BrowseError> {
    let mut entries = list_entries(path, include_hidden)?;
    sort_entries(&mut entries, key, descending);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    fn file(name: &str, size: u64, secs: u64) -> FileEntry {
        FileEntry::new_file(name, name, size, UNIX_EPOCH + Duration::from_secs(secs))
    }

    fn dir(name: &str, secs: u64) -> FileEntry {
        FileEntry::new_directory(name, name, UNIX_EPOCH + Duration::from_secs(secs))
    }

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_compare_names_case_insensitive() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zed", "alpha"), Ordering::Greater);
        assert_eq!(compare_names("a", "a"), Ordering::Equal);
        // Same folded name: raw name decides
        assert_eq!(compare_names("A", "a"), Ordering::Less);
    }

    #[test]
    fn test_sort_by_name() {
        let mut entries = vec![
            file("beta.txt", 1, 0),
            dir("Zoo", 0),
            file("Alpha.txt", 1, 0),
            dir("apps", 0),
        ];
        sort_entries(&mut entries, SortKey::Name, false);
        assert_eq!(names(&entries), vec!["apps", "Zoo", "Alpha.txt", "beta.txt"]);
    }

    #[test]
    fn test_sort_by_size_ascending() {
        let mut entries = vec![
            file("big", 300, 0),
            dir("b_dir", 0),
            file("small", 10, 0),
            dir("a_dir", 0),
            file("mid", 100, 0),
        ];
        sort_entries(&mut entries, SortKey::Size, false);
        assert_eq!(names(&entries), vec!["a_dir", "b_dir", "small", "mid", "big"]);
    }

    #[test]
    fn test_sort_by_size_descending() {
        let mut entries = vec![file("small", 10, 0), dir("d", 0), file("big", 300, 0)];
        sort_entries(&mut entries, SortKey::Size, true);
        assert_eq!(names(&entries), vec!["d", "big", "small"]);
    }

    #[test]
    fn test_sort_by_size_ties_broken_by_name() {
        let mut entries = vec![file("b", 5, 0), file("a", 5, 0), file("c", 1, 0)];
        sort_entries(&mut entries, SortKey::Size, true);
        assert_eq!(names(&entries), vec!["a", "b", "c"]);

        sort_entries(&mut entries, SortKey::Size, false);
        assert_eq!(names(&entries), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_by_modified() {
        let mut entries = vec![
            file("old", 0, 10),
            file("new", 0, 30),
            dir("old_dir", 5),
            dir("new_dir", 50),
        ];
        sort_entries(&mut entries, SortKey::Modified, false);
        assert_eq!(names(&entries), vec!["new_dir", "old_dir", "new", "old"]);
    }

    #[test]
    fn test_sort_by_modified_directory_beats_newer_file() {
        let mut entries = vec![file("fresh", 0, 1000), dir("stale", 1)];
        sort_entries(&mut entries, SortKey::Modified, false);
        assert_eq!(names(&entries), vec!["stale", "fresh"]);
    }
}
