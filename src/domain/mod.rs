//! Core types: Note, NotePath, Tag, Reference, BrokenLink

mod link;
mod note;
mod note_path;
mod tag;
mod title;

pub use link::{BrokenLink, Reference};
pub use note::{Note, NoteBuilder};
pub use note_path::{NOTE_EXTENSION, NotePath, NotePathError, OUTPUT_EXTENSION};
pub use tag::{ParseTagError, Tag, normalize_key};
pub use title::{TitleCandidates, TitleSource, UNTITLED, title_from_file_stem};
