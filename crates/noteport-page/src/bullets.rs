//! Outliner bullet restructuring.
//!
//! Knowledge-base pages are outlines: every paragraph is a `- ` bullet and nesting is
//! expressed with tabs. These transforms turn an outline into ordinary markdown. They
//! are meant to run in this order:
//!
//! 1. [`remove_empty_bullet_points`]
//! 2. [`unindent_multiline_strings`]
//! 3. [`first_bullet_points_to_paragraphs`]
//! 4. [`second_to_first_bullet_points`]
//! 5. [`remove_tab_from_multi_level_bullet_points`]
//!
//! Each step relies on the indentation left behind by the previous one. Running them
//! in another order changes which lines count as first or second level.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A line holding nothing but a bullet marker. Only ASCII whitespace counts as blank.
static EMPTY_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[\t\n\f\r ]*-[\t\n\f\r ]*$").expect("valid empty bullet regex")
});

/// A top-level bullet marker.
static FIRST_LEVEL_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- ").expect("valid first level regex"));

/// A bullet marker indented by exactly one tab.
static SECOND_LEVEL_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\t-").expect("valid second level regex"));

/// A bullet marker indented by two or more tabs; the group excludes the first tab.
static DEEP_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\t(\t+-)").expect("valid deep bullet regex"));

/// A top-level bullet followed by continuation lines indented with two spaces.
static MULTILINE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n?(- .*\n(?:  .*\n?)+)").expect("valid multiline block regex")
});

/// The bullet marker or two-space indent at the start of a block line.
static BLOCK_LINE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[- ] ").expect("valid block prefix regex"));

/// Deletes lines that contain only a `-` marker and whitespace.
pub fn remove_empty_bullet_points(text: &str) -> String {
    EMPTY_BULLET.replace_all(text, "").into_owned()
}

/// Strips the bullet marker and continuation indent from multi-line bullets.
///
/// Code blocks written under a bullet
///
/// ````text
/// - ```ts
///   const hello = "world"
///   ```
/// ````
///
/// come out flush left and separated from the preceding text by a blank line:
///
/// ````text
///
/// ```ts
/// const hello = "world"
/// ```
/// ````
pub fn unindent_multiline_strings(text: &str) -> String {
    MULTILINE_BLOCK
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let block = &caps[1];
            let leading = &whole[..whole.len() - block.len()];
            format!("\n{leading}{}", BLOCK_LINE_PREFIX.replace_all(block, ""))
        })
        .into_owned()
}

/// Turns every top-level `- ` marker into a paragraph break.
pub fn first_bullet_points_to_paragraphs(text: &str) -> String {
    FIRST_LEVEL_BULLET.replace_all(text, "\n").into_owned()
}

/// Promotes tab-indented bullets to top level, preceded by a blank line.
pub fn second_to_first_bullet_points(text: &str) -> String {
    SECOND_LEVEL_BULLET.replace_all(text, "\n-").into_owned()
}

/// Removes one leading tab from bullets nested two or more levels deep.
pub fn remove_tab_from_multi_level_bullet_points(text: &str) -> String {
    DEEP_BULLET.replace_all(text, "$1").into_owned()
}
