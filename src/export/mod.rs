//! Static site rendering for compiled notes.
//!
//! Turns a compiled [`Bundle`](crate::compile::Bundle) into HTML pages, tag
//! pages, a client-side search page and its JSON index, with customizable
//! note templates and CSS themes.

mod assets;
mod html;
pub mod links;
pub mod site;
pub mod template;
mod theme;

pub use assets::SEARCH_JS;
pub use html::{PulldownConverter, markdown_to_html};
pub use links::{BrokenLinkHandling, LinkResolution, LinkResolver, LinkResolverOptions, LinkRewrite};
pub use site::{DEFAULT_SITE_TITLE, SiteConfig, SiteResult, generate_site};
pub use template::{DEFAULT_NOTE_TEMPLATE, Page, SiteTemplates, trusted_html, trusted_url};
pub use theme::{THEME_DARK, THEME_DEFAULT, get_theme_css};
