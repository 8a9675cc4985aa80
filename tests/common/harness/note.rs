//! Builder for test note files.

// Allow dead code since not every test binary uses every builder method
#![allow(dead_code)]

/// Builder for the text of a note file.
///
/// Renders an optional `---` header with `title` and `tags`, followed by
/// the body.
#[derive(Debug, Clone)]
pub struct TestNote {
    path: String,
    title: Option<String>,
    tags: Vec<String>,
    body: String,
}

impl TestNote {
    /// Creates a note at `path`, relative to the notes directory.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            tags: Vec::new(),
            body: String::new(),
        }
    }

    /// Sets the header title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds a tag to the header.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the body content.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Appends a markdown link to another note.
    pub fn link(mut self, text: &str, target: &str) -> Self {
        if !self.body.is_empty() && !self.body.ends_with('\n') {
            self.body.push('\n');
        }
        self.body.push_str(&format!("[{text}]({target})\n"));
        self
    }

    /// Returns the relative path of the note.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Renders the file content.
    pub fn to_content(&self) -> String {
        let mut out = String::new();
        if self.title.is_some() || !self.tags.is_empty() {
            out.push_str("---\n");
            if let Some(title) = &self.title {
                out.push_str(&format!("title: {title}\n"));
            }
            if !self.tags.is_empty() {
                out.push_str(&format!("tags: {}\n", self.tags.join(", ")));
            }
            out.push_str("---\n");
        }
        out.push_str(&self.body);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_without_header() {
        let note = TestNote::new("a.md").body("# A\n\nText");
        assert_eq!(note.to_content(), "# A\n\nText");
    }

    #[test]
    fn test_note_builder_fluent() {
        let note = TestNote::new("guides/setup.md")
            .title("Setup")
            .tag("go")
            .tag("Tools")
            .body("Intro")
            .link("Index", "../index.md");

        assert_eq!(note.path(), "guides/setup.md");
        assert_eq!(
            note.to_content(),
            "---\ntitle: Setup\ntags: go, Tools\n---\nIntro\n[Index](../index.md)\n"
        );
    }
}
