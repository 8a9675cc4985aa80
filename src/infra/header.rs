//! Metadata header parser.
//!
//! A note may start with a header block delimited by `---` lines holding
//! `key: value` lines. Only `title` and `tags` are read. Parsing never fails:
//! anything unexpected is skipped and the title fallback rules fill the gaps.

use crate::domain::{NotePath, Tag, TitleCandidates, TitleSource};
use crate::infra::markdown::first_heading;

/// Line that opens and closes the header block.
pub const HEADER_DELIMITER: &str = "---";

/// Values read from a metadata header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub title: Option<String>,
    pub tags: Vec<Tag>,
}

/// Result of parsing a note source.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNote {
    pub title: String,
    pub title_source: TitleSource,
    pub tags: Vec<Tag>,
    pub raw_body: String,
}

/// Parses a note's content into title, tags and body.
///
/// # Format
/// ```text
/// ---
/// title: Note Title
/// tags: rust, cli
/// ---
/// Body content here...
/// ```
///
/// The header is optional. When it is missing, unterminated, or lacks a
/// title, the title falls back to the first level-1 heading and then to the
/// file name.
pub fn parse_note(content: &str, path: &NotePath) -> ParsedNote {
    let (header, body) = match split_header(content) {
        Some((header, body)) => (parse_header(header), strip_leading_blank_lines(body)),
        None => (Header::default(), content),
    };

    let heading = first_heading(body);
    let (title, title_source) = TitleCandidates {
        header: header.title.as_deref(),
        heading: heading.as_deref(),
        path,
    }
    .resolve();

    ParsedNote {
        title,
        title_source,
        tags: header.tags,
        raw_body: body.to_string(),
    }
}

/// Splits content into `(header, body)`.
///
/// Returns `None` unless the first line is a delimiter and a closing
/// delimiter line follows.
pub fn split_header(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim() != HEADER_DELIMITER {
        return None;
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim() == HEADER_DELIMITER {
            return Some((&content[header_start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// Parses the lines between the header delimiters.
///
/// Blank lines, `#` comments and lines without `:` are skipped. Keys are
/// case-insensitive and a repeated key replaces the earlier value.
pub fn parse_header(header: &str) -> Header {
    let mut parsed = Header::default();

    for raw in header.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        match key.trim().to_lowercase().as_str() {
            "title" => {
                let title = unquote(value.trim()).trim();
                if !title.is_empty() {
                    parsed.title = Some(title.to_string());
                }
            }
            "tags" => parsed.tags = parse_tag_list(value),
            _ => {}
        }
    }

    parsed
}

/// Parses a comma-separated tag list such as `go, Tools` or `[go, "Tools"]`.
///
/// Empty entries are dropped and later case-insensitive duplicates discarded.
pub fn parse_tag_list(value: &str) -> Vec<Tag> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    let mut tags: Vec<Tag> = Vec::new();
    for entry in value.split(',') {
        let Ok(tag) = Tag::new(unquote(entry.trim())) else {
            continue;
        };
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn strip_leading_blank_lines(body: &str) -> &str {
    body.trim_start_matches(['\n', '\r'])
}
