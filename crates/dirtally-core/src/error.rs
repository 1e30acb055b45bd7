//! Error types for listing, navigation and scanning.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned synchronously by directory listing and navigation.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Tried to pop the last segment of a navigation stack.
    #[error("Cannot navigate above the root of the path stack")]
    InvalidStackState,

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BrowseError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path this error refers to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path }
            | Self::Io { path, .. } => Some(path),
            Self::InvalidStackState => None,
        }
    }
}

/// Errors that can occur during a category scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for the scan root.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Scan root not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Scan root is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan was cancelled before it finished.
    #[error("Scan cancelled")]
    Cancelled,

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BrowseError::io(path, source).into()
    }

    /// Whether this error means the root itself was unusable.
    ///
    /// Such scans are silently dropped by the fire-and-forget surfaces.
    pub fn is_invalid_root(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotADirectory { .. } | Self::PermissionDenied { .. }
        )
    }
}

impl From<BrowseError> for ScanError {
    fn from(err: BrowseError) -> Self {
        match err {
            BrowseError::NotFound { path } => Self::NotFound { path },
            BrowseError::NotADirectory { path } => Self::NotADirectory { path },
            BrowseError::PermissionDenied { path } => Self::PermissionDenied { path },
            BrowseError::Io { path, source } => Self::Io { path, source },
            other @ BrowseError::InvalidStackState => Self::Other {
                message: other.to_string(),
            },
        }
    }
}

/// Error parsing a category definition.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// Definition did not have the `NAME=ext,ext` shape.
    #[error("Invalid category definition '{input}': expected NAME=ext[,ext...]")]
    Malformed { input: String },

    /// Category name was empty.
    #[error("Category name cannot be empty")]
    EmptyName,

    /// JSON category file could not be parsed.
    #[error("Invalid category JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error reading a directory.
    ReadError,
    /// Error reading metadata.
    MetadataError,
}

/// Non-fatal warning encountered during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a permission denied warning.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Permission denied: {}", path.display()),
            path,
            kind: WarningKind::PermissionDenied,
        }
    }

    /// Create a warning from a listing failure of a directory below the root.
    pub fn from_browse(err: &BrowseError) -> Self {
        let path = err.path().cloned().unwrap_or_default();
        match err {
            BrowseError::PermissionDenied { .. } => Self::permission_denied(path),
            _ => Self::new(path, err.to_string(), WarningKind::ReadError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_error_io() {
        let err = BrowseError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, BrowseError::PermissionDenied { .. }));

        let err = BrowseError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, BrowseError::NotFound { .. }));

        let err = BrowseError::io("/test/path", std::io::Error::other("boom"));
        assert!(matches!(err, BrowseError::Io { .. }));
    }

    #[test]
    fn test_scan_error_from_browse() {
        let err: ScanError = BrowseError::NotADirectory {
            path: "/etc/hosts".into(),
        }
        .into();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
        assert!(err.is_invalid_root());
        assert!(!ScanError::Cancelled.is_invalid_root());
    }

    #[test]
    fn test_scan_warning_creation() {
        let warning = ScanWarning::permission_denied("/test/path");
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.contains("Permission denied"));

        let warning = ScanWarning::from_browse(&BrowseError::NotFound {
            path: "/gone".into(),
        });
        assert_eq!(warning.kind, WarningKind::ReadError);
        assert_eq!(warning.path, std::path::PathBuf::from("/gone"));
    }
}
