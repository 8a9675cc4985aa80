//! Search records and plain-text projection of rendered bodies.

use serde::Serialize;

use crate::domain::{Note, NotePath};

/// Maximum excerpt length in characters, ellipsis included.
pub const EXCERPT_LENGTH: usize = 160;

/// Elements whose text content is never visible.
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

/// Searchable projection of one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    pub title: String,
    pub tags: Vec<String>,
    pub path: NotePath,
    pub excerpt: String,
    pub search_text: String,
}

impl SearchRecord {
    /// Builds the record of a fully compiled note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title().to_string(),
            tags: note.tags().iter().map(|t| t.name().to_string()).collect(),
            path: note.path().clone(),
            excerpt: note.excerpt().to_string(),
            search_text: note.search_text().to_string(),
        }
    }

    /// Returns true if every query token occurs in the record.
    ///
    /// Matching is case-insensitive substring containment per whitespace
    /// separated token. An empty query matches nothing.
    pub fn matches(&self, query: &str) -> bool {
        let tokens = query_tokens(query);
        !tokens.is_empty() && self.matches_tokens(&tokens)
    }

    fn matches_tokens(&self, tokens: &[String]) -> bool {
        let haystack = self.search_text.to_lowercase();
        tokens.iter().all(|t| haystack.contains(t.as_str()))
    }
}

/// Ordered collection of search records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchIndex {
    records: Vec<SearchRecord>,
}

impl SearchIndex {
    pub fn new(records: Vec<SearchRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    /// Returns the records matching a query, in record order.
    pub fn search(&self, query: &str) -> Vec<&SearchRecord> {
        let tokens = query_tokens(query);
        if tokens.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.matches_tokens(&tokens))
            .collect()
    }
}

fn query_tokens(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Concatenates title, tags and body text into one searchable string.
pub fn search_text(title: &str, tags: &[&str], body_text: &str) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(tags.len() + 2);
    parts.push(title);
    parts.extend_from_slice(tags);
    parts.push(body_text);
    collapse_whitespace(&parts.join(" "))
}

/// Shortens visible text to at most [`EXCERPT_LENGTH`] characters.
///
/// ```
/// use notegraph::compile::excerpt;
///
/// assert_eq!(excerpt("short text"), "short text");
/// let long = "x".repeat(200);
/// assert!(excerpt(&long).ends_with('…'));
/// assert_eq!(excerpt(&long).chars().count(), 160);
/// ```
pub fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= EXCERPT_LENGTH {
        return text.to_string();
    }
    let mut short: String = text.chars().take(EXCERPT_LENGTH - 1).collect();
    short.truncate(short.trim_end().len());
    short.push('…');
    short
}

/// Strips HTML markup, leaving the visible text.
///
/// Block boundaries become spaces, `script` and `style` contents and
/// comments are dropped, and character references are decoded. Runs of
/// whitespace collapse to a single space.
///
/// ```
/// use notegraph::compile::html_to_text;
///
/// assert_eq!(
///     html_to_text("<h1>Title</h1><p>Fish &amp; <em>chips</em></p>"),
///     "Title Fish & chips"
/// );
/// ```
pub fn html_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        decode_entities_into(&rest[..start], &mut text);
        let after = &rest[start..];

        if let Some(comment) = after.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }

        let Some(end) = after.find('>') else {
            // A lone `<` is text.
            decode_entities_into(after, &mut text);
            rest = "";
            break;
        };
        let tag = &after[1..end];
        rest = &after[end + 1..];
        text.push(' ');

        // A stray closing tag hides nothing.
        if tag.starts_with('/') {
            continue;
        }
        let name = tag_name(tag);
        if let Some(hidden) = HIDDEN_ELEMENTS.iter().find(|h| name.eq_ignore_ascii_case(h)) {
            rest = skip_past_closing(rest, hidden);
        }
    }
    decode_entities_into(rest, &mut text);

    collapse_whitespace(&text)
}

fn tag_name(tag: &str) -> &str {
    let end = tag
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(tag.len());
    &tag[..end]
}

fn skip_past_closing<'a>(html: &'a str, element: &str) -> &'a str {
    let closing = format!("</{}", element);
    let lower = html.to_ascii_lowercase();
    match lower.find(&closing) {
        Some(pos) => html[pos..].find('>').map_or("", |end| &html[pos + end + 1..]),
        None => "",
    }
}

/// Decodes HTML character references in text or an attribute value.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    decode_entities_into(s, &mut out);
    out
}

fn decode_entities_into(s: &str, out: &mut String) {
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        match after.find(';').filter(|&end| end <= 10) {
            Some(end) => match decode_entity(&after[1..end]) {
                Some(c) => {
                    out.push(c);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &after[1..];
                }
            },
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
