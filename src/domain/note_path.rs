//! Corpus-relative note identity.

use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::path::{Component, Path};
use thiserror::Error;

/// Extension of note source files.
pub const NOTE_EXTENSION: &str = "md";

/// Extension of rendered note documents.
pub const OUTPUT_EXTENSION: &str = "html";

/// A normalized, corpus-relative path identifying one note.
///
/// Segments are joined with `/` regardless of platform, `.` segments are
/// dropped and `..` segments consume the preceding segment. The extension is
/// kept, so `guides/setup.md` and `guides/setup` are different identities.
///
/// # Examples
///
/// ```
/// use notegraph::domain::NotePath;
///
/// let path = NotePath::new("guides/./intro/../setup.md").unwrap();
/// assert_eq!(path.as_str(), "guides/setup.md");
/// assert_eq!(path.output_path(), "guides/setup.html");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotePath(String);

/// Error returned when a path cannot be used as a note identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotePathError {
    #[error("note path is empty")]
    Empty,

    #[error("note path must be relative: {0}")]
    Absolute(String),

    #[error("note path escapes the notes directory: {0}")]
    EscapesRoot(String),

    #[error("note path is not valid UTF-8: {0}")]
    NonUtf8(String),

    #[error("note path must end in .{NOTE_EXTENSION}: {0}")]
    NotMarkdown(String),
}

impl NotePath {
    /// Creates a note path from a `/`-separated relative path.
    ///
    /// # Errors
    ///
    /// Returns `NotePathError` if the path is empty, absolute, climbs above
    /// the root, or does not carry the note extension.
    pub fn new(path: &str) -> Result<Self, NotePathError> {
        if path.trim().is_empty() {
            return Err(NotePathError::Empty);
        }
        if path.starts_with('/') || path.starts_with('\\') {
            return Err(NotePathError::Absolute(path.to_string()));
        }

        let segments = normalize(&[], path)
            .ok_or_else(|| NotePathError::EscapesRoot(path.to_string()))?;
        Self::from_segments(segments, path)
    }

    /// Creates a note path from a filesystem path relative to the notes directory.
    ///
    /// # Errors
    ///
    /// Returns `NotePathError` for absolute paths, non-UTF-8 components, paths
    /// escaping the root, and non-note files.
    pub fn from_relative_path(path: &Path) -> Result<Self, NotePathError> {
        let display = path.to_string_lossy().into_owned();
        let mut segments: Vec<&str> = Vec::new();

        for component in path.components() {
            match component {
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .ok_or_else(|| NotePathError::NonUtf8(display.clone()))?;
                    segments.push(part);
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if segments.pop().is_none() {
                        return Err(NotePathError::EscapesRoot(display));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(NotePathError::Absolute(display));
                }
            }
        }

        if segments.is_empty() {
            return Err(NotePathError::Empty);
        }
        Self::from_segments(segments, &display)
    }

    fn from_segments(segments: Vec<&str>, original: &str) -> Result<Self, NotePathError> {
        if segments.is_empty() {
            return Err(NotePathError::Empty);
        }
        let joined = segments.join("/");
        if !has_note_extension(&joined) {
            return Err(NotePathError::NotMarkdown(original.to_string()));
        }
        Ok(Self(joined))
    }

    /// Resolves a link target written inside this note.
    ///
    /// Relative targets resolve against this note's directory; targets
    /// starting with `/` resolve against the corpus root. Returns `None` when
    /// the target is empty, climbs above the root, or is not a note file.
    pub fn resolve(&self, target: &str) -> Option<NotePath> {
        let (base, target) = match target.strip_prefix('/') {
            Some(rooted) => (Vec::new(), rooted),
            None => (self.dir_segments(), target),
        };
        let segments = normalize(&base, target)?;
        Self::from_segments(segments, target).ok()
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the directory part, or an empty string for notes at the root.
    pub fn dir(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    fn dir_segments(&self) -> Vec<&str> {
        self.dir().split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Returns the final path segment.
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Returns the file name without the note extension.
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        name.strip_suffix(NOTE_EXTENSION)
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(name)
    }

    /// Returns the corpus-relative path of the rendered document.
    pub fn output_path(&self) -> String {
        let without_ext = &self.0[..self.0.len() - NOTE_EXTENSION.len()];
        format!("{}{}", without_ext, OUTPUT_EXTENSION)
    }
}

fn has_note_extension(path: &str) -> bool {
    path.strip_suffix(NOTE_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .is_some_and(|stem| !stem.is_empty() && !stem.ends_with('/'))
}

/// Applies `target` to `base`, folding `.` and `..` segments.
///
/// Returns `None` if a `..` would climb above the root.
fn normalize<'a>(base: &[&'a str], target: &'a str) -> Option<Vec<&'a str>> {
    let mut segments: Vec<&str> = base.to_vec();
    for part in target.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments)
}

impl fmt::Display for NotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NotePath(\"{}\")", self.0)
    }
}

impl Borrow<str> for NotePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NotePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
