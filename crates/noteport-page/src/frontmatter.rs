//! Frontmatter parsing for knowledge-base pages.
//!
//! Pages may start with a block of `key: value` lines delimited by `---`:
//!
//! ```markdown
//! ---
//! title: My Page
//! folder: posts
//! ---
//! - First bullet
//! ```
//!
//! The block is not YAML. Each line is split at its first `:` and both halves are
//! trimmed; anything more structured is kept verbatim as a string value.

use std::path::PathBuf;

use crate::{Attributes, Page};

/// The frontmatter delimiter line.
const DELIMITER: &str = "---";

/// Parses a raw page into a [`Page`] named `filename`.
pub fn parse_page(filename: impl Into<PathBuf>, content: &str) -> Page {
    let (text, attributes) = parse_text_and_attributes(content);
    Page {
        filename: filename.into(),
        attributes,
        assets: Vec::new(),
        text,
    }
}

/// Splits raw page content into its body text and frontmatter attributes.
///
/// If the content does not start with a complete `---` delimited block, the whole
/// input is returned as the body with no attributes. Malformed frontmatter is never an
/// error.
///
/// Frontmatter must:
/// - Start on the first line, which is exactly `---`
/// - End at the next line that is exactly `---`
///
/// Only the line break after the closing delimiter is consumed, so the body is
/// returned verbatim.
pub fn parse_text_and_attributes(content: &str) -> (String, Attributes) {
    let unmarked = content.strip_prefix('\u{feff}').unwrap_or(content);
    match split_frontmatter(unmarked) {
        Some((block, body)) => (body.to_string(), parse_attributes(block)),
        None => (content.to_string(), Attributes::new()),
    }
}

/// Splits content into the frontmatter block and the remaining body.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let after_opening = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let closing_pos = find_closing_delimiter(after_opening)?;
    let block = &after_opening[..closing_pos];
    let remaining = &after_opening[closing_pos + DELIMITER.len()..];
    let body = remaining
        .strip_prefix("\r\n")
        .or_else(|| remaining.strip_prefix('\n'))
        .unwrap_or(remaining);

    Some((block, body))
}

/// Finds the byte offset of the closing `---` line.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            return Some(pos);
        }
        pos += line.len();
    }
    None
}

/// Extracts `key: value` pairs from a frontmatter block.
///
/// Lines without a `:` are ignored, as are lines whose value is empty: `draft:` does not
/// produce a `draft` attribute at all. A repeated key keeps its last value.
fn parse_attributes(block: &str) -> Attributes {
    block
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}
