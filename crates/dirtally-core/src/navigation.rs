//! Current-directory tracking as a stack of path segments.

use std::path::{MAIN_SEPARATOR, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BrowseError;

/// Navigation history from a root to the current directory.
///
/// Segments are stored bottom-to-top and concatenated in that order to form
/// the current path, e.g. `["/storage", "/DCIM", "/Camera"]` is
/// `/storage/DCIM/Camera`. The stack always holds at least the root segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PathStack {
    segments: Vec<String>,
}

impl PathStack {
    /// Create a stack positioned at `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![root.into()],
        }
    }

    /// Rebuild a stack from bottom-to-top segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, BrowseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(BrowseError::InvalidStackState);
        }
        Ok(Self { segments })
    }

    /// The current path: all segments concatenated bottom to top.
    pub fn current_path(&self) -> String {
        self.segments.concat()
    }

    /// The current path as a `PathBuf`.
    pub fn current_dir(&self) -> PathBuf {
        PathBuf::from(self.current_path())
    }

    /// Push a raw segment on top of the stack.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Enter the child directory `name` of the current path.
    pub fn enter(&mut self, name: &str) {
        self.push(format!("{MAIN_SEPARATOR}{name}"));
    }

    /// Drop the top segment and return the new current path.
    ///
    /// The root segment cannot be popped; trying returns
    /// [`BrowseError::InvalidStackState`] and leaves the stack unchanged.
    pub fn pop_to_parent(&mut self) -> Result<String, BrowseError> {
        if self.segments.len() <= 1 {
            return Err(BrowseError::InvalidStackState);
        }
        self.segments.pop();
        Ok(self.current_path())
    }

    /// Check if the stack is positioned at its root.
    pub fn is_at_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Number of segments above the root.
    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }

    /// The bottom segment.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// All segments, bottom first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl TryFrom<Vec<String>> for PathStack {
    type Error = BrowseError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_segments(segments)
    }
}

impl From<PathStack> for Vec<String> {
    fn from(stack: PathStack) -> Self {
        stack.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_path_concatenates_bottom_to_top() {
        let mut stack = PathStack::new("/storage");
        stack.push("/DCIM");
        stack.push("/Camera");
        assert_eq!(stack.current_path(), "/storage/DCIM/Camera");
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.root(), "/storage");
    }

    #[test]
    fn test_pop_to_parent_returns_new_path() {
        let mut stack = PathStack::new("/storage");
        stack.push("/DCIM");
        stack.push("/Camera");

        assert_eq!(stack.pop_to_parent().unwrap(), "/storage/DCIM");
        assert_eq!(stack.pop_to_parent().unwrap(), "/storage");
        assert!(stack.is_at_root());
    }

    #[test]
    fn test_pop_root_is_rejected() {
        let mut stack = PathStack::new("/storage");
        assert!(matches!(
            stack.pop_to_parent(),
            Err(BrowseError::InvalidStackState)
        ));
        assert_eq!(stack.current_path(), "/storage");
    }

    #[test]
    fn test_from_segments() {
        let stack = PathStack::from_segments(["/a", "/b"]).unwrap();
        assert_eq!(stack.current_path(), "/a/b");

        let empty: [&str; 0] = [];
        assert!(PathStack::from_segments(empty).is_err());
    }

    #[test]
    fn test_deserialize_rejects_empty_stack() {
        let stack: PathStack = serde_json::from_str(r#"["/a", "/b"]"#).unwrap();
        assert_eq!(stack.current_path(), "/a/b");
        assert!(serde_json::from_str::<PathStack>("[]").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_enter_adds_separator() {
        let mut stack = PathStack::new("/home");
        stack.enter("user");
        assert_eq!(stack.current_dir(), PathBuf::from("/home/user"));
    }
}
