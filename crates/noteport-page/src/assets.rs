//! Asset extraction and link rewriting.
//!
//! Pages reference images with explicitly relative URLs (`./` or `../`). On the blog
//! those files are served flat from a single prefix, so every relative reference is
//! recorded on the page for copying and rewritten to `{prefix}/{basename}`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::Page;

/// A markdown image with a relative URL, split into prefix, URL and closing paren.
static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!\[.*?\]\()(\.\.?/.+?)(\))").expect("valid markdown image regex")
});

/// An explicitly relative URL.
static RELATIVE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.\.?/").expect("valid relative url regex"));

/// Builds the web URL for an asset: the prefix joined with the asset's base name.
///
/// The directory part of `url` is discarded: `../assets/x.png` under `/img` is
/// `/img/x.png`.
pub fn blog_asset_url(url: &str, prefix: &str) -> String {
    let name = url.rsplit('/').next().unwrap_or(url);
    if name.is_empty() {
        return prefix.to_string();
    }
    if prefix.is_empty() {
        return name.to_string();
    }
    format!("{}/{name}", prefix.trim_end_matches('/'))
}

/// Collects relative image references into `page.assets` and rewrites them.
///
/// Body images come first, in order of appearance, followed by the `image` attribute
/// when it holds a relative path. Remote and absolute URLs are left alone and not
/// recorded. Any previously recorded assets are replaced.
pub fn process_markdown_images(mut page: Page, prefix: &str) -> Page {
    let mut assets = Vec::new();
    let text = MARKDOWN_IMAGE
        .replace_all(&page.text, |caps: &Captures<'_>| {
            let url = &caps[2];
            assets.push(url.to_string());
            format!("{}{}{}", &caps[1], blog_asset_url(url, prefix), &caps[3])
        })
        .into_owned();
    page.text = text;
    page.assets = assets;

    if let Some(image) = page.attributes.get_mut("image")
        && RELATIVE_URL.is_match(image)
    {
        page.assets.push(image.clone());
        *image = blog_asset_url(image, prefix);
    }

    page
}
