//! Case-insensitive tag type for categorizing notes.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A tag attached to a note.
///
/// Tags keep the spelling they were written with for display, and compare
/// through a normalized key (trimmed, lowercased), making `Go`, `go` and `GO`
/// the same tag.
///
/// # Examples
///
/// ```
/// use notegraph::domain::Tag;
///
/// let tag = Tag::new(" Tools ").unwrap();
/// assert_eq!(tag.name(), "Tools");
/// assert_eq!(tag.key(), "tools");
/// assert_eq!(tag, Tag::new("TOOLS").unwrap());
/// ```
#[derive(Clone)]
pub struct Tag {
    name: String,
    key: String,
}

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if the tag is empty or whitespace-only.
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            key: normalize_key(name),
        })
    }

    /// Returns the tag as it was written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized key used for matching.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Normalizes a tag string into its matching key.
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.name)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn new_trims_and_keeps_case_for_display() {
        let tag = Tag::new("  Rust  ").unwrap();
        assert_eq!(tag.name(), "Rust");
        assert_eq!(tag.key(), "rust");
        assert_eq!(tag.to_string(), "Rust");
    }

    #[test]
    fn new_rejects_empty() {
        assert!(Tag::new("").is_err());
        assert!(Tag::new("   ").is_err());
    }

    #[test]
    fn new_accepts_non_ascii() {
        let tag = Tag::new("メモ").unwrap();
        assert_eq!(tag.key(), "メモ");

        let tag = Tag::new("Ärger").unwrap();
        assert_eq!(tag.key(), "ärger");
    }

    #[test]
    fn equality_ignores_case() {
        assert_eq!(Tag::new("go").unwrap(), Tag::new("GO").unwrap());
        assert_ne!(Tag::new("go").unwrap(), Tag::new("golang").unwrap());
    }

    #[test]
    fn hash_set_deduplicates_case_variants() {
        let set: HashSet<Tag> = ["Go", "go", "GO", "tools"]
            .iter()
            .map(|s| Tag::new(s).unwrap())
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn ordering_uses_key() {
        let mut tags = vec![Tag::new("beta").unwrap(), Tag::new("Alpha").unwrap()];
        tags.sort();
        assert_eq!(tags[0].name(), "Alpha");
    }

    #[test]
    fn parse_via_from_str() {
        let tag: Tag = "Draft".parse().unwrap();
        assert_eq!(tag.key(), "draft");
    }

    #[test]
    fn serializes_display_name() {
        let json = serde_json::to_string(&Tag::new("Tools").unwrap()).unwrap();
        assert_eq!(json, "\"Tools\"");
    }
}
