//! Tag index: tag → notes declaring it.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Note, NotePath, normalize_key};

/// Notes sharing one normalized tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagBucket {
    name: String,
    notes: Vec<NotePath>,
}

impl TagBucket {
    /// Canonical (normalized) tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Notes declaring the tag, ordered by path.
    pub fn notes(&self) -> &[NotePath] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Index from normalized tag to the notes declaring it.
///
/// Derived entirely from note tags, so every bucket holds at least one note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagIndex {
    buckets: BTreeMap<String, TagBucket>,
}

impl TagIndex {
    /// Builds the index from every note's tags.
    pub fn build(notes: &[Note]) -> Self {
        let mut buckets: BTreeMap<String, TagBucket> = BTreeMap::new();

        for note in notes {
            for tag in note.tags() {
                buckets
                    .entry(tag.key().to_string())
                    .or_insert_with(|| TagBucket {
                        name: tag.key().to_string(),
                        notes: Vec::new(),
                    })
                    .notes
                    .push(note.path().clone());
            }
        }

        for bucket in buckets.values_mut() {
            bucket.notes.sort();
            bucket.notes.dedup();
        }

        debug!(tags = buckets.len(), "built tag index");
        Self { buckets }
    }

    /// Looks up a tag by any spelling.
    pub fn get(&self, tag: &str) -> Option<&TagBucket> {
        self.buckets.get(&normalize_key(tag))
    }

    /// Notes declaring a tag; empty when the tag is unknown.
    pub fn notes_for(&self, tag: &str) -> &[NotePath] {
        self.get(tag).map_or(&[], TagBucket::notes)
    }

    /// Iterates over buckets in tag order.
    pub fn iter(&self) -> impl Iterator<Item = &TagBucket> {
        self.buckets.values()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;
    use pretty_assertions::assert_eq;

    fn note(path: &str, tags: &[&str]) -> Note {
        Note::builder(NotePath::new(path).unwrap(), path)
            .tags(tags.iter().map(|t| Tag::new(t).unwrap()).collect())
            .build()
    }

    fn paths(paths: &[NotePath]) -> Vec<&str> {
        paths.iter().map(NotePath::as_str).collect()
    }

    #[test]
    fn case_variants_share_one_bucket() {
        let notes = vec![note("a.md", &["go", "Tools"]), note("b.md", &["GO"])];
        let index = TagIndex::build(&notes);

        let go = index.get("Go").unwrap();
        assert_eq!(go.name(), "go");
        assert_eq!(paths(go.notes()), vec!["a.md", "b.md"]);
        assert_eq!(paths(index.notes_for("tools")), vec!["a.md"]);

        // display casing stays on the note
        assert_eq!(notes[0].tags()[1].name(), "Tools");
        assert_eq!(notes[1].tags()[0].name(), "GO");
    }

    #[test]
    fn bucket_notes_ordered_by_path() {
        let notes = vec![
            note("z.md", &["x"]),
            note("a/b.md", &["x"]),
            note("m.md", &["x"]),
        ];
        let index = TagIndex::build(&notes);
        assert_eq!(paths(index.notes_for("x")), vec!["a/b.md", "m.md", "z.md"]);
    }

    #[test]
    fn untagged_notes_contribute_nothing() {
        let index = TagIndex::build(&[note("a.md", &[])]);
        assert!(index.is_empty());
        assert!(index.notes_for("anything").is_empty());
    }

    #[test]
    fn buckets_iterate_in_key_order() {
        let index = TagIndex::build(&[note("a.md", &["rust", "Cli", "async"])]);
        let names: Vec<&str> = index.iter().map(TagBucket::name).collect();
        assert_eq!(names, vec!["async", "cli", "rust"]);
    }

    #[test]
    fn round_trip_both_directions() {
        let notes = vec![
            note("a.md", &["one", "two"]),
            note("b.md", &["Two", "three"]),
            note("c.md", &[]),
        ];
        let index = TagIndex::build(&notes);

        for n in &notes {
            for tag in n.tags() {
                assert!(index.notes_for(tag.name()).contains(n.path()));
            }
        }
        for bucket in index.iter() {
            assert!(!bucket.is_empty());
            for path in bucket.notes() {
                let n = notes.iter().find(|n| n.path() == path).unwrap();
                assert!(n.has_tag(&Tag::new(bucket.name()).unwrap()));
            }
        }
    }
}
