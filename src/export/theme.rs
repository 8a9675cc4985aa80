//! CSS themes for generated sites.

use std::path::Path;

use anyhow::{Context, Result, anyhow};

/// Light palette.
pub const THEME_DEFAULT: &str = r#":root {
    color-scheme: light;
    --bg: #f7f7f7;
    --surface: #ffffff;
    --text: #222222;
    --muted: #666666;
    --border: #e2e2e2;
    --link: #0a58ca;
    --tag-bg: #e8eefc;
    --code-bg: #f0f0f0;
    --broken: #b42318;
}
"#;

/// Dark palette.
pub const THEME_DARK: &str = r#":root {
    color-scheme: dark;
    --bg: #0d1117;
    --surface: #161b22;
    --text: #e6edf3;
    --muted: #8b949e;
    --border: #30363d;
    --link: #58a6ff;
    --tag-bg: #1f2a3d;
    --code-bg: #1f242c;
    --broken: #f85149;
}
"#;

/// Layout rules shared by the built-in palettes.
const LAYOUT: &str = r#"
body {
    margin: 0;
    font-family: system-ui, -apple-system, 'Segoe UI', 'Noto Sans', sans-serif;
    line-height: 1.6;
    background: var(--bg);
    color: var(--text);
}
a { color: var(--link); text-decoration: none; }
a:hover { text-decoration: underline; }
a[title^="Broken link"] { color: var(--broken); text-decoration: line-through; }
.site-header {
    display: flex;
    flex-wrap: wrap;
    align-items: baseline;
    justify-content: space-between;
    gap: 1rem;
    padding: 1rem 2rem;
    background: var(--surface);
    border-bottom: 1px solid var(--border);
}
.site-title { font-weight: 700; font-size: 1.2rem; color: var(--text); }
.site-nav a { margin-left: 1rem; }
main {
    max-width: 860px;
    margin: 2rem auto;
    padding: 2rem;
    background: var(--surface);
    border: 1px solid var(--border);
    border-radius: 6px;
}
.site-footer { text-align: center; color: var(--muted); font-size: 0.85rem; padding: 1rem; }
.note-meta { color: var(--muted); font-size: 0.9rem; }
.note-meta time { margin-right: 0.75rem; }
.tag {
    display: inline-block;
    margin: 0 0.25rem 0.25rem 0;
    padding: 0.1rem 0.5rem;
    border-radius: 999px;
    background: var(--tag-bg);
    font-size: 0.85rem;
}
.note-list, .tag-list, .search-results { list-style: none; padding: 0; }
.note-list li, .search-results li {
    padding: 0.75rem 0;
    border-bottom: 1px solid var(--border);
}
.note-list li:last-child, .search-results li:last-child { border-bottom: none; }
.excerpt { color: var(--muted); font-size: 0.9rem; }
.count { color: var(--muted); }
.backlinks { margin-top: 2.5rem; padding-top: 1rem; border-top: 1px solid var(--border); }
pre { background: var(--code-bg); padding: 1rem; overflow-x: auto; border-radius: 4px; }
code { font-family: 'SF Mono', Menlo, Consolas, monospace; font-size: 0.9em; }
:not(pre) > code { background: var(--code-bg); padding: 0.1rem 0.3rem; border-radius: 3px; }
blockquote { margin-left: 0; padding-left: 1rem; border-left: 3px solid var(--border); color: var(--muted); }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid var(--border); padding: 0.4rem 0.6rem; text-align: left; }
img { max-width: 100%; height: auto; }
input[type="search"] {
    width: 100%;
    box-sizing: border-box;
    padding: 0.6rem 0.8rem;
    font-size: 1rem;
    color: var(--text);
    background: var(--bg);
    border: 1px solid var(--border);
    border-radius: 4px;
}
.search-hint { color: var(--muted); font-size: 0.85rem; margin: 0.5rem 0 1rem; }
@media (max-width: 640px) {
    main { margin: 0; border: none; border-radius: 0; padding: 1rem; }
    .site-header { padding: 1rem; }
}
"#;

/// Returns the stylesheet for a built-in theme name.
///
/// # Arguments
///
/// * `theme` - Theme name ("default", "dark") or path to custom CSS file.
///   If None, returns the default theme.
///
/// # Errors
///
/// Returns an error if the theme name is unknown or the CSS file cannot be read.
pub fn get_theme_css(theme: Option<&str>) -> Result<String> {
    match theme {
        None | Some("default") => Ok(format!("{THEME_DEFAULT}{LAYOUT}")),
        Some("dark") => Ok(format!("{THEME_DARK}{LAYOUT}")),
        Some(path) => {
            let path = Path::new(path);
            if path.is_file() {
                std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read theme {}", path.display()))
            } else {
                Err(anyhow!(
                    "Unknown theme: '{}'. Use 'default', 'dark', or a path to a CSS file.",
                    path.display()
                ))
            }
        }
    }
}
