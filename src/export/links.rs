//! Link resolution for rendered note pages.
//!
//! Rewrites relative `.md` links in a note's converted HTML to the matching
//! `.html` page, relative to the page being rendered. Links to notes that do
//! not exist are drawn according to [`BrokenLinkHandling`].

use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::escape::{escape_href, escape_html};
use regex::Regex;
use serde::Deserialize;

use crate::compile::{LinkGraph, decode_entities, resolve_reference};
use crate::domain::NotePath;
use crate::infra::relative_url;

/// An opening anchor tag with its attributes, or a closing anchor tag.
static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a\b([^>]*)>|</a\s*>").expect("anchor pattern is valid"));

/// The `href` attribute inside an anchor's attribute list.
static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\shref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("href pattern is valid")
});

/// A `title` attribute, with its leading whitespace.
static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\stitle\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+)"#).expect("title pattern is valid")
});

/// Result of resolving links in content.
#[derive(Debug)]
pub struct LinkResolution {
    /// The rendered HTML with rewritten links.
    pub content: String,
    /// Number of links pointing at existing notes.
    pub resolved: usize,
    /// Number of links pointing at missing notes.
    pub broken: usize,
}

/// Options for link resolution.
#[derive(Debug, Clone, Default)]
pub struct LinkResolverOptions {
    /// How to handle broken links.
    pub broken_link_handling: BrokenLinkHandling,
}

/// How to handle broken links (links to notes that don't exist).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkHandling {
    /// Leave the link unchanged.
    Preserve,
    /// Point the link at `#` with a "Broken link" title.
    #[default]
    #[serde(rename = "mark")]
    #[value(name = "mark")]
    MarkBroken,
    /// Remove the link, keeping only the text.
    #[serde(rename = "remove")]
    #[value(name = "remove")]
    RemoveLink,
}

/// What to do with one link destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRewrite {
    /// Not a note link; leave it alone.
    Unchanged,
    /// Existing note; point at its page.
    Target(String),
    /// Missing note, kept exactly as written.
    Dangling,
    /// Missing note, drawn as a dead link with this title.
    Broken(String),
    /// Missing note; drop the link and keep its text.
    Remove,
}

/// Rewrites note links against the compiled link graph.
pub struct LinkResolver<'a> {
    graph: &'a LinkGraph,
    options: &'a LinkResolverOptions,
}

impl<'a> LinkResolver<'a> {
    pub fn new(graph: &'a LinkGraph, options: &'a LinkResolverOptions) -> Self {
        Self { graph, options }
    }

    /// Decides how a link destination written in `source` is rendered.
    pub fn rewrite(&self, source: &NotePath, dest: &str) -> LinkRewrite {
        let Some(reference) = resolve_reference(source, dest) else {
            return LinkRewrite::Unchanged;
        };

        match reference.target() {
            Some(target) if self.graph.contains(target) => {
                let mut url = relative_url(&source.output_path(), &target.output_path());
                if let Some(fragment) = reference.fragment() {
                    url.push('#');
                    url.push_str(fragment);
                }
                LinkRewrite::Target(url)
            }
            _ => match self.options.broken_link_handling {
                BrokenLinkHandling::Preserve => LinkRewrite::Dangling,
                BrokenLinkHandling::MarkBroken => {
                    LinkRewrite::Broken(format!("Broken link: {}", reference.raw_target()))
                }
                BrokenLinkHandling::RemoveLink => LinkRewrite::Remove,
            },
        }
    }

    /// Rewrites the note links in a note's converted HTML.
    ///
    /// Anchors are matched in the markup itself, so any
    /// [`BodyConverter`](crate::compile::BodyConverter) output works as long
    /// as links come out as `<a href=...>`.
    pub fn resolve(&self, source: &NotePath, html: &str) -> LinkResolution {
        let mut content = String::with_capacity(html.len());
        let mut resolved = 0;
        let mut broken = 0;
        let mut dropping = false;
        let mut copied = 0;

        for caps in ANCHOR.captures_iter(html) {
            let Some(tag) = caps.get(0) else {
                continue;
            };
            content.push_str(&html[copied..tag.start()]);
            copied = tag.end();

            let Some(attrs) = caps.get(1).map(|m| m.as_str()) else {
                // Links never nest, so the next closing tag ends a dropped link.
                if !std::mem::take(&mut dropping) {
                    content.push_str(tag.as_str());
                }
                continue;
            };
            let Some((span, dest)) = find_href(attrs) else {
                content.push_str(tag.as_str());
                continue;
            };

            match self.rewrite(source, &dest) {
                LinkRewrite::Unchanged => content.push_str(tag.as_str()),
                LinkRewrite::Dangling => {
                    broken += 1;
                    content.push_str(tag.as_str());
                }
                LinkRewrite::Target(url) => {
                    resolved += 1;
                    content.push_str(&anchor_with(attrs, span, &url, None));
                }
                LinkRewrite::Broken(note) => {
                    broken += 1;
                    content.push_str(&anchor_with(attrs, span, "#", Some(&note)));
                }
                LinkRewrite::Remove => {
                    broken += 1;
                    dropping = true;
                }
            }
        }
        content.push_str(&html[copied..]);

        LinkResolution {
            content,
            resolved,
            broken,
        }
    }
}

/// Finds the `href` attribute, returning its span and decoded value.
fn find_href(attrs: &str) -> Option<(Range<usize>, String)> {
    let caps = HREF.captures(attrs)?;
    let span = caps.get(0)?.range();
    let value = caps.get(1).or(caps.get(2)).or(caps.get(3))?;
    Some((span, decode_entities(value.as_str())))
}

/// Rebuilds an opening anchor with a new `href`, and optionally a new `title`.
fn anchor_with(attrs: &str, href: Range<usize>, url: &str, title: Option<&str>) -> String {
    let keep = |part: &str| match title {
        Some(_) => TITLE.replace_all(part, "").into_owned(),
        None => part.to_string(),
    };

    let mut tag = String::from("<a");
    tag.push_str(&keep(&attrs[..href.start]));
    tag.push_str(" href=\"");
    // Writing into a String cannot fail.
    let _ = escape_href(&mut tag, url);
    tag.push('"');
    if let Some(title) = title {
        tag.push_str(" title=\"");
        let _ = escape_html(&mut tag, title);
        tag.push('"');
    }
    tag.push_str(&keep(&attrs[href.end..]));
    tag.push('>');
    tag
}
