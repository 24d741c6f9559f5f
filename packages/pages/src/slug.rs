//! Slug normalization
//!
//! Slugs are compared in normalized form only. The empty slug is the site
//! root.

/// Normalize a requested slug
///
/// Lowercases, turns whitespace and `_` into `-`, drops anything outside
/// `[a-z0-9-/]`, collapses repeated separators and trims separators from
/// both ends and from every path segment.
pub fn normalize_slug(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    for c in input.trim().chars().flat_map(char::to_lowercase) {
        match c {
            'a'..='z' | '0'..='9' | '-' | '/' => cleaned.push(c),
            c if c.is_whitespace() || c == '_' => cleaned.push('-'),
            _ => {}
        }
    }

    cleaned
        .split('/')
        .map(|segment| {
            segment
                .split('-')
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("-")
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// True if a non-empty request normalized away to nothing
pub(crate) fn is_degenerate(input: &str, normalized: &str) -> bool {
    normalized.is_empty() && !input.trim().trim_matches('/').is_empty()
}
