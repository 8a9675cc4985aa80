//! Note struct representing one compiled markdown note.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::domain::{NotePath, Reference, Tag, TitleSource};

/// A compiled note.
///
/// Notes are built once per source file during a compile and never change
/// afterwards. Backlinks are not stored here: they only exist once every note
/// is known and live in the link graph.
///
/// # Examples
///
/// ```
/// use notegraph::domain::{Note, NotePath, Tag};
///
/// let note = Note::builder(NotePath::new("rust/tips.md").unwrap(), "Rust Tips")
///     .tags(vec![Tag::new("rust").unwrap()])
///     .raw_body("Some tips.")
///     .build();
/// assert_eq!(note.title(), "Rust Tips");
/// assert_eq!(note.path().as_str(), "rust/tips.md");
/// ```
#[derive(Clone, PartialEq, Serialize)]
pub struct Note {
    path: NotePath,
    title: String,
    title_source: TitleSource,
    tags: Vec<Tag>,
    raw_body: String,
    rendered_body: String,
    references: Vec<Reference>,
    outgoing_links: Vec<NotePath>,
    search_text: String,
    excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<DateTime<Utc>>,
}

impl Note {
    /// Creates a builder for a note with the given identity and title.
    pub fn builder(path: NotePath, title: impl Into<String>) -> NoteBuilder {
        NoteBuilder::new(path, title)
    }

    /// Returns the note's corpus-relative identity.
    pub fn path(&self) -> &NotePath {
        &self.path
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns which fallback rule produced the title.
    pub fn title_source(&self) -> TitleSource {
        self.title_source
    }

    /// Returns the note's tags in declaration order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the body text after the metadata header.
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// Returns the body converted to an HTML fragment.
    pub fn rendered_body(&self) -> &str {
        &self.rendered_body
    }

    /// Returns the candidate references found in the body.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Returns the notes this note links to, in reference order.
    pub fn outgoing_links(&self) -> &[NotePath] {
        &self.outgoing_links
    }

    /// Returns the flattened text used for search.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Returns a short plain-text summary of the body.
    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    /// Returns when the source file was last modified, if known.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    /// Returns true if the note declares the tag (case-insensitively).
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.path)
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("path", &self.path)
            .field("title", &self.title)
            .field("title_source", &self.title_source)
            .field("tags", &self.tags)
            .field("references", &self.references)
            .field("outgoing_links", &self.outgoing_links)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a Note.
pub struct NoteBuilder {
    path: NotePath,
    title: String,
    title_source: TitleSource,
    tags: Vec<Tag>,
    raw_body: String,
    rendered_body: String,
    references: Vec<Reference>,
    outgoing_links: Vec<NotePath>,
    search_text: String,
    excerpt: String,
    modified: Option<DateTime<Utc>>,
}

impl NoteBuilder {
    fn new(path: NotePath, title: impl Into<String>) -> Self {
        Self {
            path,
            title: title.into(),
            title_source: TitleSource::Header,
            tags: Vec::new(),
            raw_body: String::new(),
            rendered_body: String::new(),
            references: Vec::new(),
            outgoing_links: Vec::new(),
            search_text: String::new(),
            excerpt: String::new(),
            modified: None,
        }
    }

    /// Records which fallback rule produced the title.
    pub fn title_source(mut self, source: TitleSource) -> Self {
        self.title_source = source;
        self
    }

    /// Sets the note's tags.
    ///
    /// Duplicates are removed case-insensitively (first spelling kept).
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = deduplicate(tags);
        self
    }

    /// Sets the body text.
    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = body.into();
        self
    }

    /// Sets the converted HTML body.
    pub fn rendered_body(mut self, html: impl Into<String>) -> Self {
        self.rendered_body = html.into();
        self
    }

    /// Sets the candidate references.
    pub fn references(mut self, references: Vec<Reference>) -> Self {
        self.references = references;
        self
    }

    /// Sets the resolved outgoing links.
    ///
    /// Duplicates are removed (first occurrence kept).
    pub fn outgoing_links(mut self, links: Vec<NotePath>) -> Self {
        self.outgoing_links = deduplicate(links);
        self
    }

    /// Sets the flattened search text.
    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Sets the excerpt.
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Sets the modification time.
    pub fn modified(mut self, modified: Option<DateTime<Utc>>) -> Self {
        self.modified = modified;
        self
    }

    /// Builds the Note.
    pub fn build(self) -> Note {
        Note {
            path: self.path,
            title: self.title,
            title_source: self.title_source,
            tags: self.tags,
            raw_body: self.raw_body,
            rendered_body: self.rendered_body,
            references: self.references,
            outgoing_links: self.outgoing_links,
            search_text: self.search_text,
            excerpt: self.excerpt,
            modified: self.modified,
        }
    }
}

/// Removes duplicates, keeping the first occurrence of each item.
fn deduplicate<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut result: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !result.contains(&item) {
            result.push(item);
        }
    }
    result
}
