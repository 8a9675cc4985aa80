//! Markdown to HTML conversion.

use pulldown_cmark::{Parser, html};

use crate::compile::BodyConverter;
use crate::infra::markdown;

/// Renders a note body to an HTML fragment.
///
/// Uses the same parser options as reference extraction, so every link the
/// graph knows about appears as an `<a>` element here.
///
/// ```
/// use notegraph::export::markdown_to_html;
///
/// let html = markdown_to_html("# Inbox\n\n[next](next.md)");
/// assert!(html.contains("<h1>Inbox</h1>"));
/// assert!(html.contains(r#"href="next.md""#));
/// ```
pub fn markdown_to_html(body: &str) -> String {
    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(body, markdown::options()));
    out
}

/// Body converter backed by `pulldown-cmark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownConverter;

impl BodyConverter for PulldownConverter {
    fn to_html(&self, markdown: &str) -> String {
        markdown_to_html(markdown)
    }
}
