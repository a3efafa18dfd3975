//! Slugs for route names derived from file paths.

use std::path::Path;

use deunicode::deunicode;

/// Slugify one path segment: transliterate to ASCII, then replace every run
/// of characters outside `[A-Za-z0-9_]` with a single `-`.
///
/// - `"Getting Started"` -> `"Getting-Started"`
/// - `"démarrage (v2)"` -> `"demarrage-v2"`
pub fn slugify_segment(segment: &str) -> String {
    let ascii = deunicode(segment);
    let mut slug = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slugify a relative file path into a route name, dropping the extension.
///
/// `guides/Getting Started.md` -> `guides/Getting-Started`
pub fn slugify_path(relative: &Path) -> String {
    let stem = relative.with_extension("");
    stem.components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(slugify_segment)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
