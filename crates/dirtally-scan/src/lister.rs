//! Single-level directory listing.

use std::fs::{self, DirEntry};
use std::path::Path;

use tracing::debug;

use dirtally_core::{BrowseError, FileEntry, ScanWarning, WarningKind, is_hidden_name};

/// List the immediate children of `path`.
///
/// Hidden entries (names starting with `.`) are omitted unless
/// `include_hidden` is set. The order of the result is unspecified; use
/// [`crate::sort_entries`] or [`crate::list_and_sort`] for a defined order.
///
/// Children whose metadata cannot be read are skipped.
pub fn list_entries(path: &Path, include_hidden: bool) -> Result<Vec<FileEntry>, BrowseError> {
    let mut warnings = Vec::new();
    let entries = read_children(path, include_hidden, &mut warnings)?;
    for warning in &warnings {
        debug!(path = %warning.path.display(), "skipped entry: {}", warning.message);
    }
    Ok(entries)
}

/// Read a single path into an entry.
pub fn stat_entry(path: &Path) -> Result<FileEntry, BrowseError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    let link_metadata = fs::symlink_metadata(path).map_err(|e| BrowseError::io(path, e))?;
    let is_symlink = link_metadata.file_type().is_symlink();
    let metadata = if is_symlink {
        fs::metadata(path).unwrap_or(link_metadata)
    } else {
        link_metadata
    };

    Ok(FileEntry::from_metadata(name, path, &metadata, is_symlink))
}

/// List children of `path`, collecting per-entry failures as warnings.
pub(crate) fn read_children(
    path: &Path,
    include_hidden: bool,
    warnings: &mut Vec<ScanWarning>,
) -> Result<Vec<FileEntry>, BrowseError> {
    let metadata = fs::metadata(path).map_err(|e| BrowseError::io(path, e))?;
    if !metadata.is_dir() {
        return Err(BrowseError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let read_dir = fs::read_dir(path).map_err(|e| BrowseError::io(path, e))?;
    let mut entries = Vec::new();

    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(err) => {
                warnings.push(ScanWarning::new(
                    path,
                    err.to_string(),
                    WarningKind::ReadError,
                ));
                continue;
            }
        };

        let name = dir_entry.file_name().to_string_lossy().to_string();
        if !include_hidden && is_hidden_name(&name) {
            continue;
        }

        match read_entry(&dir_entry, name) {
            Ok(entry) => entries.push(entry),
            Err(err) => warnings.push(ScanWarning::new(
                dir_entry.path(),
                err.to_string(),
                WarningKind::MetadataError,
            )),
        }
    }

    Ok(entries)
}

/// Build an entry, following symlinks for the directory/size view.
fn read_entry(dir_entry: &DirEntry, name: String) -> std::io::Result<FileEntry> {
    let path = dir_entry.path();
    let is_symlink = dir_entry.file_type()?.is_symlink();

    let metadata = if is_symlink {
        // Dangling links fall back to the link's own metadata
        fs::metadata(&path).or_else(|_| fs::symlink_metadata(&path))?
    } else {
        dir_entry.metadata()?
    };

    Ok(FileEntry::from_metadata(name, path, &metadata, is_symlink))
}
