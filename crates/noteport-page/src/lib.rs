//! Page parsing, transformation and rendering for noteport.
//!
//! A knowledge-base page goes through three steps on its way to the blog:
//! - [`parse_page`] splits raw content into frontmatter attributes and body text
//! - [`transform_page`] threads the page through the ordered transform pipeline
//! - [`render`] serializes the result back into a document with standard frontmatter
//!
//! Nothing in this crate touches the filesystem. Asset references discovered during
//! transformation are recorded on the [`Page`] for the export layer to copy.

#![warn(missing_docs)]

mod assets;
mod bullets;
mod frontmatter;
mod meta;
mod pipeline;
mod render;
mod slug;
mod wikilink;

use std::{collections::BTreeMap, path::PathBuf};

pub use assets::{blog_asset_url, process_markdown_images};
pub use bullets::{
    first_bullet_points_to_paragraphs, remove_empty_bullet_points,
    remove_tab_from_multi_level_bullet_points, second_to_first_bullet_points,
    unindent_multiline_strings,
};
pub use frontmatter::{parse_page, parse_text_and_attributes};
pub use meta::{add_file_name, add_slug_file_name, add_title_if_missing};
pub use pipeline::{
    FileNaming, Transform, TransformOptions, apply_all, only_text, page_transforms,
    transform_page,
};
pub use render::{quote, render};
use serde::Serialize;
pub use slug::{generate_file_name, sanitize_file_name};
pub use wikilink::wikilinks_to_links;

/// Frontmatter attributes keyed by attribute name.
///
/// Keys are unique and case-sensitive. A `BTreeMap` iterates in lexicographic key order,
/// which is the order attributes are rendered in.
pub type Attributes = BTreeMap<String, String>;

/// A knowledge-base page on its way through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Source base name at parse time; a path relative to the output root after
    /// [`add_file_name`] has run.
    pub filename: PathBuf,
    /// Frontmatter attributes.
    pub attributes: Attributes,
    /// Relative asset references, in order of discovery, as they appeared in the source.
    pub assets: Vec<String>,
    /// Markdown body.
    pub text: String,
}

impl Page {
    /// Creates a page with no attributes and no assets.
    pub fn new(filename: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            ..Self::default()
        }
    }
}
