//! Page templates for generated sites.
//!
//! Every page extends `base.html`, which links the stylesheet and the site
//! navigation through the `root` prefix (`""` or `"../"` repeated) so pages
//! work when opened straight from disk.

use anyhow::Result;
use minijinja::{Environment, Value};
use serde::Serialize;

/// Shared page layout.
pub const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{% block title %}{{ site_title }}{% endblock %}</title>
    <link rel="stylesheet" href="{{ root }}assets/style.css">
    {% block scripts %}{% endblock %}
</head>
<body>
    <header class="site-header">
        <a class="site-title" href="{{ root }}index.html">{{ site_title }}</a>
        <nav class="site-nav" aria-label="Site">
            <a href="{{ root }}index.html">Notes</a>
            <a href="{{ root }}tags/index.html">Tags</a>
            <a href="{{ root }}search.html">Search</a>
        </nav>
    </header>
    <main>
        {% block content %}{% endblock %}
    </main>
    <footer class="site-footer">
        Generated with notegraph on {{ generated }}
    </footer>
</body>
</html>
"##;

/// Default template for individual note pages.
pub const DEFAULT_NOTE_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ title }} | {{ site_title }}{% endblock %}
{% block content %}
<article class="note">
    <header>
        <h1>{{ title }}</h1>
        <div class="note-meta">
            {% if modified %}<time datetime="{{ modified_iso }}">{{ modified }}</time>{% endif %}
            {% for tag in tags %}<a class="tag" href="{{ tag.url }}">{{ tag.name }}</a>{% endfor %}
        </div>
    </header>
    <section class="note-body">
        {{ content }}
    </section>
    {% if backlinks %}
    <section class="backlinks">
        <h2>Backlinks</h2>
        <ul>
        {% for link in backlinks %}
            <li><a href="{{ link.url }}">{{ link.title }}</a></li>
        {% endfor %}
        </ul>
    </section>
    {% endif %}
</article>
{% endblock %}
"##;

/// Template for the list of every note.
pub const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<h1>{{ site_title }}</h1>
<p class="count">{{ notes | length }} note{% if notes | length != 1 %}s{% endif %}</p>
<ul class="note-list">
{% for note in notes %}
    <li>
        <a href="{{ note.url }}">{{ note.title }}</a>
        {% if note.excerpt %}<div class="excerpt">{{ note.excerpt }}</div>{% endif %}
        <div class="note-meta">
            {% if note.modified %}<time>{{ note.modified }}</time>{% endif %}
            {% for tag in note.tags %}<a class="tag" href="{{ tag.url }}">{{ tag.name }}</a>{% endfor %}
        </div>
    </li>
{% else %}
    <li>No notes yet.</li>
{% endfor %}
</ul>
{% endblock %}
"##;

/// Template for the list of tags.
pub const TAGS_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Tags | {{ site_title }}{% endblock %}
{% block content %}
<h1>Tags</h1>
<ul class="tag-list">
{% for tag in tags %}
    <li><a class="tag" href="{{ tag.url }}">{{ tag.name }}</a> <span class="count">({{ tag.count }})</span></li>
{% else %}
    <li>No tags.</li>
{% endfor %}
</ul>
{% endblock %}
"##;

/// Template for the notes carrying one tag.
pub const TAG_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}#{{ tag }} | {{ site_title }}{% endblock %}
{% block content %}
<h1>#{{ tag }}</h1>
<p class="count">{{ notes | length }} note{% if notes | length != 1 %}s{% endif %}</p>
<ul class="note-list">
{% for note in notes %}
    <li>
        <a href="{{ note.url }}">{{ note.title }}</a>
        {% if note.excerpt %}<div class="excerpt">{{ note.excerpt }}</div>{% endif %}
    </li>
{% endfor %}
</ul>
{% endblock %}
"##;

/// Template for the client-side search page.
pub const SEARCH_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Search | {{ site_title }}{% endblock %}
{% block scripts %}<script src="{{ root }}assets/search.js" defer></script>{% endblock %}
{% block content %}
<h1>Search</h1>
<div id="search-app" data-index-url="{{ root }}search-index.json">
    <input type="search" placeholder="Search notes" aria-label="Search terms">
    <div class="search-hint">Matches titles, tags and note text.</div>
    <ul class="search-results"></ul>
</div>
{% endblock %}
"##;

/// Page kinds, named after their template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Note,
    Index,
    Tags,
    Tag,
    Search,
}

impl Page {
    fn template_name(self) -> &'static str {
        match self {
            Page::Note => "note.html",
            Page::Index => "index.html",
            Page::Tags => "tags.html",
            Page::Tag => "tag.html",
            Page::Search => "search.html",
        }
    }
}

/// Loaded site templates.
///
/// Template names end in `.html`, so values are HTML-escaped unless marked
/// safe with [`Value::from_safe_string`].
pub struct SiteTemplates<'source> {
    env: Environment<'source>,
}

impl<'source> SiteTemplates<'source> {
    /// Loads the built-in templates, replacing the note template if given.
    pub fn new(note_template: Option<&'source str>) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("note.html", note_template.unwrap_or(DEFAULT_NOTE_TEMPLATE))?;
        env.add_template("index.html", INDEX_TEMPLATE)?;
        env.add_template("tags.html", TAGS_TEMPLATE)?;
        env.add_template("tag.html", TAG_TEMPLATE)?;
        env.add_template("search.html", SEARCH_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders a page with the given context.
    pub fn render<S: Serialize>(&self, page: Page, ctx: S) -> Result<String> {
        let tmpl = self.env.get_template(page.template_name())?;
        Ok(tmpl.render(ctx)?)
    }
}

/// Marks already-rendered HTML so templates insert it unescaped.
pub fn trusted_html(html: String) -> Value {
    Value::from_safe_string(html)
}

/// Escapes a URL for an attribute, leaving `/` readable.
///
/// The default HTML escaper also rewrites `/`, which turns every relative
/// link into `..&#x2f;page.html`.
pub fn trusted_url(url: &str) -> Value {
    let mut escaped = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Value::from_safe_string(escaped)
}
