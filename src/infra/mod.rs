//! File I/O, header parsing, slugs and URL helpers

mod fs;
pub mod header;
pub mod markdown;
mod slug;
mod url;

pub use fs::{FsError, SourceText, decode_source, read_source, scan_notes_directory, write_file_atomic};
pub use header::{Header, ParsedNote, parse_note};
pub use slug::{FALLBACK_SLUG, slugify, unique_slugs};
pub use url::{join_base_url, percent_decode, relative_url, root_prefix};
