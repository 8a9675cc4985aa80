//! Slug generation for tag page file names.

use std::collections::{BTreeMap, HashSet};

/// Slug used when nothing usable remains.
pub const FALLBACK_SLUG: &str = "tag";

/// Converts a tag name to a file-name-safe slug.
///
/// - Converts to lowercase
/// - Replaces whitespace with hyphens
/// - Keeps alphanumeric characters (any script), hyphens, underscores and dots
/// - Collapses consecutive hyphens
/// - Trims leading/trailing hyphens and dots
/// - Truncates to 50 characters
/// - Returns `tag` for empty results
///
/// # Examples
///
/// ```
/// use notegraph::infra::slugify;
///
/// assert_eq!(slugify("Rust Tips"), "rust-tips");
/// assert_eq!(slugify("C++"), "c");
/// assert_eq!(slugify("日本語"), "日本語");
/// assert_eq!(slugify("!!!"), "tag");
/// ```
pub fn slugify(name: &str) -> String {
    const MAX_LENGTH: usize = 50;

    let mut collapsed = String::new();
    let mut prev_was_hyphen = false;
    for c in name.to_lowercase().chars() {
        let mapped = if c.is_whitespace() || c == '-' {
            '-'
        } else if c.is_alphanumeric() || c == '_' || c == '.' {
            c
        } else {
            continue;
        };

        if mapped == '-' {
            if !prev_was_hyphen {
                collapsed.push('-');
            }
            prev_was_hyphen = true;
        } else {
            collapsed.push(mapped);
            prev_was_hyphen = false;
        }
    }

    let trimmed: String = collapsed
        .trim_matches(|c| c == '-' || c == '.')
        .chars()
        .take(MAX_LENGTH)
        .collect();
    let trimmed = trimmed.trim_end_matches(|c| c == '-' || c == '.');

    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Assigns a distinct slug to every name.
///
/// Names are processed in sorted order; a slug already taken, or listed in
/// `reserved`, gets a `-2`, `-3`, ... suffix, so the assignment is stable for
/// the same set of names.
pub fn unique_slugs<'a, I>(names: I, reserved: &[&str]) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sorted: Vec<&str> = names.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut used: HashSet<String> = reserved.iter().map(|r| r.to_string()).collect();
    let mut slugs = BTreeMap::new();
    for name in sorted {
        let base = slugify(name);
        let mut candidate = base.clone();
        let mut counter = 1;
        while used.contains(&candidate) {
            counter += 1;
            candidate = format!("{}-{}", base, counter);
        }
        used.insert(candidate.clone());
        slugs.insert(name.to_string(), candidate);
    }
    slugs
}
