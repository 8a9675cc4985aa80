//! Reference extraction from note bodies.
//!
//! Finds markdown links whose destination is a relative path to another note
//! and resolves them to candidate identities. Existence is checked later by
//! the link graph builder, once every note is known.

use std::collections::HashSet;
use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag as MdTag};
use regex::Regex;

use crate::domain::{NOTE_EXTENSION, NotePath, Reference};
use crate::infra::{markdown, percent_decode};

/// Matches a URI scheme such as `https:` or `mailto:`.
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme pattern is valid"));

/// A link destination that points at a note file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTarget {
    /// Decoded path part of the destination.
    pub path: String,
    /// `#fragment` without the `#`, if present.
    pub fragment: Option<String>,
}

/// Extracts the ordered, de-duplicated note references from a body.
///
/// Links inside code spans and code blocks are not links, and images are not
/// references. Duplicates are detected on the resolved identity, so `b.md`
/// and `./b.md` count once; the first spelling is kept. Targets outside the
/// notes directory are compared on their folded path, so `../x.md` and
/// `./../x.md#part` count once too.
pub fn extract_references(source: &NotePath, body: &str) -> Vec<Reference> {
    let mut seen_targets: HashSet<NotePath> = HashSet::new();
    let mut seen_outside: HashSet<String> = HashSet::new();
    let mut references = Vec::new();

    for event in Parser::new_ext(body, markdown::options()) {
        let Event::Start(MdTag::Link(_, dest, _)) = event else {
            continue;
        };
        let Some(target) = note_target(&dest) else {
            continue;
        };

        let resolved = source.resolve(&target.path);
        let is_new = match &resolved {
            Some(path) => seen_targets.insert(path.clone()),
            None => seen_outside.insert(folded_path(source, &target.path)),
        };
        if is_new {
            references.push(Reference::new(&*dest, resolved, target.fragment));
        }
    }

    references
}

/// Resolves a single link destination written in `source`.
///
/// Returns `None` when the destination is not a note reference at all
/// (external URL, pure fragment, other file type).
pub fn resolve_reference(source: &NotePath, dest: &str) -> Option<Reference> {
    let target = note_target(dest)?;
    let resolved = source.resolve(&target.path);
    Some(Reference::new(dest, resolved, target.fragment))
}

/// Classifies a link destination as a note target.
///
/// ```
/// use notegraph::compile::note_target;
///
/// let target = note_target("../guides/setup.md#install").unwrap();
/// assert_eq!(target.path, "../guides/setup.md");
/// assert_eq!(target.fragment.as_deref(), Some("install"));
///
/// assert!(note_target("https://example.com/a.md").is_none());
/// assert!(note_target("image.png").is_none());
/// ```
pub fn note_target(dest: &str) -> Option<NoteTarget> {
    let dest = dest.trim();
    if dest.is_empty() || is_external_link(dest) || dest.starts_with('#') {
        return None;
    }

    let (before_fragment, fragment) = match dest.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment.to_string())),
        None => (dest, None),
    };
    let path = before_fragment
        .split_once('?')
        .map_or(before_fragment, |(path, _)| path);

    let decoded = percent_decode(path).unwrap_or_else(|| path.to_string());
    if !has_note_extension(&decoded) {
        return None;
    }

    Some(NoteTarget {
        path: decoded,
        fragment,
    })
}

/// Joins `target` onto the directory of `source` and folds `.` and `..`
/// segments, keeping any `..` that climbs above the notes directory.
fn folded_path(source: &NotePath, target: &str) -> String {
    let (mut segments, target) = match target.strip_prefix('/') {
        Some(rooted) => (Vec::new(), rooted),
        None => (
            source.dir().split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>(),
            target,
        ),
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." if segments.last().is_some_and(|last| *last != "..") => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Checks if a link target is an external URL.
fn is_external_link(target: &str) -> bool {
    target.starts_with("//") || SCHEME.is_match(target)
}

fn has_note_extension(path: &str) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(stem, ext)| ext == NOTE_EXTENSION && !stem.is_empty() && !stem.ends_with('/'))
}
