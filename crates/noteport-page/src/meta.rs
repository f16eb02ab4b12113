//! Attribute and filename transforms.

use std::path::PathBuf;

use crate::{Page, generate_file_name};

/// Sets the `title` attribute from the filename when it is absent or empty.
///
/// The filename's final extension is dropped: `note.md` yields `note`, `v1.2.md` yields
/// `v1.2`. Running this twice changes nothing the second time.
pub fn add_title_if_missing(mut page: Page) -> Page {
    if page.attributes.get("title").is_none_or(String::is_empty) {
        let name = page.filename.to_string_lossy();
        let title = strip_extension(&name).to_string();
        page.attributes.insert("title".into(), title);
    }
    page
}

/// Places the page under its `folder` attribute.
///
/// The attribute always uses `/` as separator; each segment becomes a path component,
/// so the result uses the platform separator. Empty segments are dropped, which keeps
/// `/posts` relative. `..` segments are kept here and rejected when the page is
/// written.
pub fn add_file_name(mut page: Page) -> Page {
    if let Some(folder) = page.attributes.get("folder") {
        let mut path: PathBuf = folder.split('/').filter(|s| !s.is_empty()).collect();
        path.push(&page.filename);
        page.filename = path;
    }
    page
}

/// Renames the page with [`generate_file_name`], then places it like [`add_file_name`].
pub fn add_slug_file_name(mut page: Page) -> Page {
    let original = page.filename.to_string_lossy().into_owned();
    page.filename = PathBuf::from(generate_file_name(&original, &page.attributes));
    add_file_name(page)
}

/// Removes everything from the last `.` onward.
fn strip_extension(name: &str) -> &str {
    name.rfind('.').map_or(name, |pos| &name[..pos])
}
