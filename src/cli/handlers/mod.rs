//! Command handlers for the CLI.

mod build;
mod check;
mod completions;
mod graph;
mod search;
mod tags;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::compile::{Bundle, Compiler};
use crate::domain::NotePath;

pub use build::handle_build;
pub use check::handle_check;
pub use completions::handle_completions;
pub use graph::{handle_backlinks, handle_graph};
pub use search::handle_search;
pub use tags::handle_tags;

// ===========================================
// Shared Utilities
// ===========================================

/// Compiles every note under `notes_dir`.
pub(crate) fn compile_notes(notes_dir: &Path) -> Result<Bundle> {
    debug!(dir = %notes_dir.display(), "compiling notes");
    Compiler::default()
        .compile_dir(notes_dir)
        .with_context(|| format!("failed to compile notes in {}", notes_dir.display()))
}

/// Parses a note argument, accepting the path with or without `.md`.
pub(crate) fn parse_note_arg(arg: &str) -> Result<NotePath> {
    let arg = arg.trim();
    let with_ext = if arg.ends_with(".md") {
        arg.to_string()
    } else {
        format!("{arg}.md")
    };
    NotePath::new(&with_ext).with_context(|| format!("invalid note path: {arg}"))
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
