//! Compile pass: sources in, immutable bundle out.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::compile::{
    GraphBuild, LinkGraph, SearchIndex, SearchRecord, TagIndex, excerpt, extract_references,
    html_to_text, search_text,
};
use crate::domain::{BrokenLink, Note, NotePath, NotePathError, Reference};
use crate::export::PulldownConverter;
use crate::infra::{FsError, ParsedNote, parse_note, read_source, scan_notes_directory};

/// Converts a markdown body to an HTML fragment.
///
/// Implementations must be pure: the compiler calls them from several
/// threads at once.
pub trait BodyConverter: Sync {
    fn to_html(&self, markdown: &str) -> String;
}

/// Errors that abort a compile.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("cannot read notes: {0}")]
    Source(#[from] FsError),

    #[error("invalid note path {}: {source}", .path.display())]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: NotePathError,
    },

    #[error(
        "duplicate note {path}: {} and {} resolve to the same note",
        .first.display(),
        .second.display()
    )]
    DuplicateNote {
        path: NotePath,
        first: PathBuf,
        second: PathBuf,
    },
}

/// One note source handed to the compiler.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the notes directory.
    pub path: PathBuf,
    pub content: String,
    pub modified: Option<DateTime<Utc>>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            modified: None,
        }
    }

    /// Sets the modification time.
    pub fn modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

/// Everything one compile produces.
///
/// Notes are ordered by path. The bundle is never updated; compiling again
/// yields a new one.
#[derive(Debug, Clone, Serialize)]
pub struct Bundle {
    notes: Vec<Note>,
    link_graph: LinkGraph,
    tag_index: TagIndex,
    search_records: SearchIndex,
    broken_links: Vec<BrokenLink>,
}

impl Bundle {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn link_graph(&self) -> &LinkGraph {
        &self.link_graph
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    pub fn search_index(&self) -> &SearchIndex {
        &self.search_records
    }

    pub fn search_records(&self) -> &[SearchRecord] {
        self.search_records.records()
    }

    /// References that did not resolve, ordered by source then reference order.
    pub fn broken_links(&self) -> &[BrokenLink] {
        &self.broken_links
    }

    /// Looks up a note by its corpus-relative path.
    pub fn note(&self, path: &str) -> Option<&Note> {
        self.notes
            .binary_search_by(|n| n.path().as_str().cmp(path))
            .ok()
            .map(|i| &self.notes[i])
    }

    /// Notes linking to the given note, ordered by path.
    pub fn backlinks(&self, path: &NotePath) -> &[NotePath] {
        self.link_graph.backlinks(path)
    }

    /// Resolves the backlinks of a note to the notes themselves.
    pub fn backlink_notes<'a>(&'a self, path: &NotePath) -> impl Iterator<Item = &'a Note> + use<'a> {
        let backlinks = self.link_graph.backlinks(path);
        backlinks.iter().filter_map(move |p| self.note(p.as_str()))
    }
}

/// Per-note work done before the barrier.
struct PreparedNote {
    path: NotePath,
    parsed: ParsedNote,
    rendered_body: String,
    references: Vec<Reference>,
    search_text: String,
    excerpt: String,
    modified: Option<DateTime<Utc>>,
}

impl PreparedNote {
    fn into_note(self, outgoing_links: Vec<NotePath>) -> Note {
        Note::builder(self.path, self.parsed.title)
            .title_source(self.parsed.title_source)
            .tags(self.parsed.tags)
            .raw_body(self.parsed.raw_body)
            .rendered_body(self.rendered_body)
            .references(self.references)
            .outgoing_links(outgoing_links)
            .search_text(self.search_text)
            .excerpt(self.excerpt)
            .modified(self.modified)
            .build()
    }
}

/// Note graph compiler.
///
/// # Examples
///
/// ```
/// use notegraph::compile::{Compiler, SourceFile};
///
/// let bundle = Compiler::default()
///     .compile_sources(vec![
///         SourceFile::new("a.md", "see [B](b.md)"),
///         SourceFile::new("b.md", "# Bee\n\nsee [ghost](ghost.md)"),
///     ])
///     .unwrap();
///
/// let b = bundle.note("b.md").unwrap();
/// assert_eq!(b.title(), "Bee");
/// assert_eq!(bundle.backlinks(b.path())[0].as_str(), "a.md");
/// assert_eq!(bundle.broken_links()[0].raw_target, "ghost.md");
/// ```
#[derive(Debug, Clone)]
pub struct Compiler<C = PulldownConverter> {
    converter: C,
}

impl Default for Compiler<PulldownConverter> {
    fn default() -> Self {
        Self::new(PulldownConverter)
    }
}

impl<C: BodyConverter> Compiler<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    /// Compiles every note under a directory.
    ///
    /// # Errors
    ///
    /// Fails if the directory or any note in it cannot be read, or if two
    /// files map to the same note.
    pub fn compile_dir(&self, root: &Path) -> Result<Bundle, CompileError> {
        let files = scan_notes_directory(root)?;
        debug!(root = %root.display(), files = files.len(), "scanned notes directory");

        let sources = files
            .into_par_iter()
            .map(|relative| {
                let text = read_source(&root.join(&relative))?;
                Ok(SourceFile {
                    path: relative,
                    content: text.content,
                    modified: text.modified,
                })
            })
            .collect::<Result<Vec<_>, FsError>>()?;

        self.compile_sources(sources)
    }

    /// Compiles in-memory note sources.
    ///
    /// # Errors
    ///
    /// Fails on a path that is not a valid note identity, or when two sources
    /// map to the same note.
    pub fn compile_sources(&self, sources: Vec<SourceFile>) -> Result<Bundle, CompileError> {
        let mut identified = sources
            .into_iter()
            .map(|source| match NotePath::from_relative_path(&source.path) {
                Ok(path) => Ok((path, source)),
                Err(err) => Err(CompileError::InvalidPath {
                    path: source.path,
                    source: err,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        identified.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.path.cmp(&b.1.path)));
        if let Some(pair) = identified.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(CompileError::DuplicateNote {
                path: pair[0].0.clone(),
                first: pair[0].1.path.clone(),
                second: pair[1].1.path.clone(),
            });
        }

        // Independent per-note work, in parallel.
        let prepared: Vec<PreparedNote> = identified
            .into_par_iter()
            .map(|(path, source)| self.prepare(path, source))
            .collect();
        debug!(notes = prepared.len(), "parsed notes");

        // Barrier: every note is known from here on.
        let GraphBuild {
            graph,
            broken_links,
        } = LinkGraph::build(prepared.iter().map(|p| (&p.path, p.references.as_slice())));
        for broken in &broken_links {
            warn!(source = %broken.source, target = %broken.raw_target, "broken link");
        }

        let notes: Vec<Note> = prepared
            .into_iter()
            .map(|p| {
                let outgoing = graph.forward(&p.path).to_vec();
                p.into_note(outgoing)
            })
            .collect();

        let tag_index = TagIndex::build(&notes);
        let search_records = SearchIndex::new(notes.iter().map(SearchRecord::from_note).collect());
        debug!(records = search_records.records().len(), "built search records");

        info!(
            notes = notes.len(),
            links = graph.edge_count(),
            tags = tag_index.len(),
            broken = broken_links.len(),
            "compiled notes"
        );

        Ok(Bundle {
            notes,
            link_graph: graph,
            tag_index,
            search_records,
            broken_links,
        })
    }

    fn prepare(&self, path: NotePath, source: SourceFile) -> PreparedNote {
        let parsed = parse_note(&source.content, &path);
        let rendered_body = self.converter.to_html(&parsed.raw_body);
        let references = extract_references(&path, &parsed.raw_body);

        let body_text = html_to_text(&rendered_body);
        let tag_names: Vec<&str> = parsed.tags.iter().map(|t| t.name()).collect();
        let search_text = search_text(&parsed.title, &tag_names, &body_text);
        let excerpt = excerpt(&body_text);

        PreparedNote {
            path,
            parsed,
            rendered_body,
            references,
            search_text,
            excerpt,
            modified: source.modified,
        }
    }
}
