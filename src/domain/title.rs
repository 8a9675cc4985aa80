//! Title fallback rules.
//!
//! A note's title comes from the first rule in [`TitleSource::ORDER`] that
//! yields a non-empty value. The order is fixed and independent of how or
//! when notes are parsed.

use serde::Serialize;

use crate::domain::NotePath;

/// Title used when every other rule yields nothing.
pub const UNTITLED: &str = "untitled";

/// Which rule produced a note's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// `title:` line in the metadata header.
    Header,
    /// First level-1 heading in the body.
    Heading,
    /// Derived from the file name.
    FileName,
}

impl TitleSource {
    /// Rules in the order they are tried.
    pub const ORDER: [TitleSource; 3] = [
        TitleSource::Header,
        TitleSource::Heading,
        TitleSource::FileName,
    ];
}

/// Candidate values for each title rule.
#[derive(Debug, Clone, Copy)]
pub struct TitleCandidates<'a> {
    pub header: Option<&'a str>,
    pub heading: Option<&'a str>,
    pub path: &'a NotePath,
}

impl TitleCandidates<'_> {
    fn candidate(&self, source: TitleSource) -> Option<String> {
        let value = match source {
            TitleSource::Header => self.header.map(str::to_string),
            TitleSource::Heading => self.heading.map(str::to_string),
            TitleSource::FileName => Some(title_from_file_stem(self.path.file_stem())),
        };
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Picks the title by walking [`TitleSource::ORDER`].
    pub fn resolve(&self) -> (String, TitleSource) {
        TitleSource::ORDER
            .iter()
            .find_map(|source| self.candidate(*source).map(|title| (title, *source)))
            .unwrap_or_else(|| (UNTITLED.to_string(), TitleSource::FileName))
    }
}

/// Turns a file stem into a readable title.
///
/// `-` and `_` become spaces and whitespace runs collapse to one space.
///
/// ```
/// use notegraph::domain::title_from_file_stem;
///
/// assert_eq!(title_from_file_stem("my-first_note"), "my first note");
/// ```
pub fn title_from_file_stem(stem: &str) -> String {
    let replaced: String = stem
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        UNTITLED.to_string()
    } else {
        collapsed
    }
}
