//! References between notes and the broken links they can produce.

use serde::Serialize;
use std::fmt;

use crate::domain::NotePath;

/// A link found in a note body that points at another note.
///
/// `target` is the candidate identity after resolving `raw_target` against
/// the referencing note's directory. It is `None` when the raw target climbs
/// above the notes directory. Whether the target exists is decided later,
/// when the whole corpus is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    raw_target: String,
    target: Option<NotePath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment: Option<String>,
}

impl Reference {
    /// Creates a new reference.
    pub fn new(
        raw_target: impl Into<String>,
        target: Option<NotePath>,
        fragment: Option<String>,
    ) -> Self {
        Self {
            raw_target: raw_target.into(),
            target,
            fragment: fragment.filter(|f| !f.is_empty()),
        }
    }

    /// Returns the link destination exactly as written.
    pub fn raw_target(&self) -> &str {
        &self.raw_target
    }

    /// Returns the resolved candidate identity, if the target stays inside the corpus.
    pub fn target(&self) -> Option<&NotePath> {
        self.target.as_ref()
    }

    /// Returns the `#fragment` part of the destination, without the `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

/// A reference whose target is not a known note.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct BrokenLink {
    /// The note containing the reference.
    pub source: NotePath,
    /// The link destination exactly as written.
    pub raw_target: String,
}

impl BrokenLink {
    /// Creates a new broken link record.
    pub fn new(source: NotePath, raw_target: impl Into<String>) -> Self {
        Self {
            source,
            raw_target: raw_target.into(),
        }
    }
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: broken link to '{}'", self.source, self.raw_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_fragment_is_dropped() {
        let reference = Reference::new("b.md#", NotePath::new("b.md").ok(), Some(String::new()));
        assert_eq!(reference.fragment(), None);
    }

    #[test]
    fn broken_link_display_names_source_and_target() {
        let broken = BrokenLink::new(NotePath::new("a.md").unwrap(), "ghost.md");
        assert_eq!(broken.to_string(), "a.md: broken link to 'ghost.md'");
    }

    #[test]
    fn broken_link_serializes_flat() {
        let broken = BrokenLink::new(NotePath::new("a.md").unwrap(), "ghost.md");
        let json = serde_json::to_value(&broken).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "source": "a.md", "raw_target": "ghost.md" })
        );
    }
}
