//! Document rendering.
//!
//! A rendered page is a frontmatter block followed by the body:
//!
//! ```markdown
//! ---
//! date: 2024-01-02
//! title: "My Page"
//! ---
//! Body text
//! ```
//!
//! Keys appear in lexicographic order. Values are double-quoted unless their key is
//! listed as unquoted, which lets dates and booleans reach the blog engine untyped.

use std::collections::BTreeSet;

use crate::Page;

/// Renders a page as a blog-ready document.
pub fn render(page: &Page, unquoted_keys: &BTreeSet<String>) -> String {
    let mut document = String::from("---\n");
    for (key, value) in &page.attributes {
        document.push_str(key);
        document.push_str(": ");
        if unquoted_keys.contains(key) {
            document.push_str(value);
        } else {
            document.push_str(&quote(value));
        }
        document.push('\n');
    }
    document.push_str("---\n");
    document.push_str(&page.text);
    document
}

/// Wraps a value in double quotes, escaping quotes, backslashes and non-printable
/// characters.
///
/// The escapes used are valid both in Go-style quoted strings and in YAML double-quoted
/// scalars. Controls, whitespace other than the ASCII space, invisible format characters
/// and private-use characters are escaped; unassigned code points pass through.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{07}' => quoted.push_str("\\a"),
            '\u{08}' => quoted.push_str("\\b"),
            '\u{0b}' => quoted.push_str("\\v"),
            '\u{0c}' => quoted.push_str("\\f"),
            c if c.is_ascii_control() => quoted.push_str(&format!("\\x{:02x}", u32::from(c))),
            c if is_printable(c) => quoted.push(c),
            c if u32::from(c) > 0xffff => quoted.push_str(&format!("\\U{:08x}", u32::from(c))),
            c => quoted.push_str(&format!("\\u{:04x}", u32::from(c))),
        }
    }
    quoted.push('"');
    quoted
}

/// Whether a character can be written into a quoted value as is.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control() || c.is_whitespace() || is_format(c) || is_private_use(c))
}

/// Invisible formatting characters such as zero-width spaces and byte order marks.
fn is_format(c: char) -> bool {
    matches!(
        c,
        '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{e0001}'
            | '\u{e0020}'..='\u{e007f}'
    )
}

/// Characters in the private use areas.
fn is_private_use(c: char) -> bool {
    matches!(
        c,
        '\u{e000}'..='\u{f8ff}' | '\u{f0000}'..='\u{ffffd}' | '\u{100000}'..='\u{10fffd}'
    )
}
