//! Link target and file name sanitization.
//!
//! Page names become URL-safe identifiers by:
//! - Replacing spaces with hyphens
//! - Dropping every character outside `[a-zA-Z0-9_-]`
//! - Lowercasing what remains
//!
//! Unlike heading slugs, repeated hyphens are kept and nothing is trimmed, so a page
//! name always maps to the same target no matter where it is linked from.

use crate::Attributes;

/// Sanitizes a page name into a link target or file name stem.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect()
}

/// Derives an output file name from the page's `slug` attribute or its original name.
///
/// A non-empty `slug` attribute wins and yields `{slug}.md`. Otherwise the stem of
/// `original_name` is sanitized and its extension kept, so `My Note.md` becomes
/// `my-note.md`.
pub fn generate_file_name(original_name: &str, attributes: &Attributes) -> String {
    if let Some(slug) = attributes.get("slug").filter(|s| !s.is_empty()) {
        return format!("{slug}.md");
    }

    match original_name.rsplit_once('.') {
        Some((stem, extension)) => format!("{}.{extension}", sanitize_file_name(stem)),
        None => sanitize_file_name(original_name),
    }
}
