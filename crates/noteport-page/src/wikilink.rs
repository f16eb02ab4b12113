//! Wikilink conversion.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::sanitize_file_name;

/// A `[[...]]` wikilink; the group holds everything between the brackets.
static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.+?)\]\]").expect("valid wikilink regex"));

/// Rewrites wikilinks as standard markdown links.
///
/// `[[My Page]]` becomes `[My Page](my-page)` and `[[My Page|click]]` becomes
/// `[click](my-page)`. The link target is the page name passed through
/// [`sanitize_file_name`]. If either side of the `|` is empty the whole inner text is
/// treated as the page name.
pub fn wikilinks_to_links(text: &str) -> String {
    WIKILINK
        .replace_all(text, |caps: &Captures<'_>| {
            let inner = &caps[1];
            match inner.split_once('|') {
                Some((page, label)) if !page.is_empty() && !label.is_empty() => {
                    format!("[{label}]({})", sanitize_file_name(page))
                }
                _ => format!("[{inner}]({})", sanitize_file_name(inner)),
            }
        })
        .into_owned()
}
