//! URL helpers for site-relative links.

/// Builds a relative URL from one site file to another.
///
/// Both arguments are `/`-separated paths relative to the site root without
/// `.` or `..` segments.
///
/// ```
/// use notegraph::infra::relative_url;
///
/// assert_eq!(relative_url("guides/setup.html", "index.html"), "../index.html");
/// assert_eq!(relative_url("index.html", "tags/rust.html"), "tags/rust.html");
/// ```
pub fn relative_url(from: &str, to: &str) -> String {
    format!("{}{}", root_prefix(from), to)
}

/// Returns the `../` prefix leading from a site file back to the site root.
pub fn root_prefix(from: &str) -> String {
    "../".repeat(from.matches('/').count())
}

/// Prefixes a site-relative path with a base URL.
///
/// An empty base leaves the path unchanged.
pub fn join_base_url(base_url: &str, path: &str) -> String {
    if base_url.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Decodes `%XX` escapes in a link destination.
///
/// Returns `None` when the escapes are malformed or decode to invalid UTF-8.
pub fn percent_decode(s: &str) -> Option<String> {
    if !s.contains('%') {
        return Some(s.to_string());
    }

    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = std::str::from_utf8(hex).ok()?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}
