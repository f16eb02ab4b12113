//! The page transform pipeline.
//!
//! A [`Transform`] maps a page to a new page. [`page_transforms`] lists them in the
//! order [`transform_page`] applies them:
//!
//! 1. Title defaulting
//! 2. Filename derivation
//! 3. Bullet restructuring (five steps, see the `bullets` module)
//! 4. Asset extraction and rewriting
//! 5. Wikilink conversion
//!
//! Asset processing sees text that has already lost its bullet markers. Wikilinks and
//! images use disjoint syntax, so their relative order only matters for determinism.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Page, add_file_name, add_slug_file_name, add_title_if_missing,
    first_bullet_points_to_paragraphs, process_markdown_images, remove_empty_bullet_points,
    remove_tab_from_multi_level_bullet_points, second_to_first_bullet_points,
    unindent_multiline_strings, wikilinks_to_links,
};

/// A page-to-page transform.
pub type Transform<'a> = Box<dyn Fn(Page) -> Page + 'a>;

/// How output file names are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileNaming {
    /// Keep the source file name.
    #[default]
    Original,
    /// Use the `slug` attribute, or the sanitized source name when there is none.
    Slug,
}

impl FromStr for FileNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "original" => Ok(Self::Original),
            "slug" => Ok(Self::Slug),
            _ => Err(format!(
                "unknown file naming '{s}' (expected 'original' or 'slug')"
            )),
        }
    }
}

impl fmt::Display for FileNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Slug => write!(f, "slug"),
        }
    }
}

/// Settings the pipeline needs from the export configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Web path that rewritten asset URLs are placed under.
    pub web_assets_path_prefix: String,
    /// Output file naming strategy.
    pub file_naming: FileNaming,
}

impl TransformOptions {
    /// Creates options with the given asset prefix and original file naming.
    pub fn new(web_assets_path_prefix: impl Into<String>) -> Self {
        Self {
            web_assets_path_prefix: web_assets_path_prefix.into(),
            file_naming: FileNaming::Original,
        }
    }
}

/// Lifts a text rewriter into a page transform.
pub fn only_text(rewrite: fn(&str) -> String) -> Transform<'static> {
    Box::new(move |mut page: Page| {
        page.text = rewrite(&page.text);
        page
    })
}

/// Threads a page through each transform in turn.
pub fn apply_all(page: Page, transforms: &[Transform<'_>]) -> Page {
    transforms
        .iter()
        .fold(page, |page, transform| transform(page))
}

/// Returns the ordered transforms for the given options.
pub fn page_transforms(options: &TransformOptions) -> Vec<Transform<'_>> {
    let file_name: Transform<'_> = match options.file_naming {
        FileNaming::Original => Box::new(add_file_name),
        FileNaming::Slug => Box::new(add_slug_file_name),
    };

    vec![
        Box::new(add_title_if_missing),
        file_name,
        only_text(remove_empty_bullet_points),
        only_text(unindent_multiline_strings),
        only_text(first_bullet_points_to_paragraphs),
        only_text(second_to_first_bullet_points),
        only_text(remove_tab_from_multi_level_bullet_points),
        Box::new(move |page| process_markdown_images(page, &options.web_assets_path_prefix)),
        only_text(wikilinks_to_links),
    ]
}

/// Applies the full pipeline to a parsed page.
///
/// Attributes are always present (possibly empty) by construction of [`Page`].
pub fn transform_page(page: Page, options: &TransformOptions) -> Page {
    apply_all(page, &page_transforms(options))
}
