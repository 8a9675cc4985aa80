//! Note graph compiler: references, link graph, tag and search indexes.

mod compiler;
mod graph;
mod references;
mod search;
mod tags;

pub use compiler::{BodyConverter, Bundle, CompileError, Compiler, SourceFile};
pub use graph::{Adjacency, GraphBuild, LinkGraph};
pub use references::{NoteTarget, extract_references, note_target, resolve_reference};
pub use search::{
    EXCERPT_LENGTH, SearchIndex, SearchRecord, decode_entities, excerpt, html_to_text, search_text,
};
pub use tags::{TagBucket, TagIndex};
