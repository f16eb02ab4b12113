//! Source page discovery.
//!
//! Walks the graph and keeps the files that should be published: pages whose path inside
//! the graph contains the content marker, have the page extension, and are not ignored.

use std::{
    ffi::OsStr,
    io,
    path::{Component, Path, PathBuf},
};

use regex::Regex;

use crate::{ExportError, Filesystem};

/// Rules deciding which files under the graph are pages to export.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    /// Substring the relative path must contain.
    pub content_marker: String,
    /// Required file extension, without the dot.
    pub extension: String,
    /// Relative paths matching this are skipped.
    pub ignore: Option<Regex>,
}

impl SourceFilter {
    /// Tests a path relative to the graph root.
    ///
    /// Matching is done on the `/`-separated form so patterns behave the same on every
    /// platform.
    pub fn matches(&self, relative: &Path) -> bool {
        let slashed = slash_path(relative);
        if self
            .ignore
            .as_ref()
            .is_some_and(|ignore| ignore.is_match(&slashed))
        {
            return false;
        }
        slashed.contains(&self.content_marker)
            && relative.extension() == Some(OsStr::new(&self.extension))
    }
}

/// Returns the files under `root` accepted by `filter`, in walk order.
pub fn find_matching_files(
    fs: &impl Filesystem,
    root: &Path,
    filter: &SourceFilter,
) -> Result<Vec<PathBuf>, ExportError> {
    let files = fs.list_files(root).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ExportError::GraphPathMissing {
                path: root.to_path_buf(),
            }
        } else {
            ExportError::Walk {
                path: root.to_path_buf(),
                source,
            }
        }
    })?;

    Ok(files
        .into_iter()
        .filter(|path| {
            path.strip_prefix(root)
                .is_ok_and(|relative| filter.matches(relative))
        })
        .collect())
}

/// Joins the normal components of a relative path with `/`.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::OsFilesystem;

    fn default_filter() -> SourceFilter {
        SourceFilter {
            content_marker: "Content/".into(),
            extension: "md".into(),
            ignore: Some(Regex::new("^(.obsidian|logseq|.git|ignore-compile)/").unwrap()),
        }
    }

    #[test]
    fn test_filter_requires_marker_and_extension() {
        let filter = default_filter();
        assert!(filter.matches(Path::new("pages/Content/post.md")));
        assert!(filter.matches(Path::new("Content/post.md")));
        assert!(!filter.matches(Path::new("pages/post.md")));
        assert!(!filter.matches(Path::new("pages/Content/image.png")));
        assert!(!filter.matches(Path::new("pages/Content/post.md.bak")));
    }

    #[test]
    fn test_filter_ignore_pattern() {
        let filter = default_filter();
        assert!(!filter.matches(Path::new("logseq/bak/Content/post.md")));
        assert!(!filter.matches(Path::new(".obsidian/Content/post.md")));
        assert!(!filter.matches(Path::new("ignore-compile/Content/post.md")));
        assert!(filter.matches(Path::new("notes/logseq/Content/post.md")));
    }

    #[test]
    fn test_filter_without_ignore() {
        let filter = SourceFilter {
            ignore: None,
            ..default_filter()
        };
        assert!(filter.matches(Path::new("logseq/Content/post.md")));
    }

    #[test]
    fn test_slash_path() {
        let path = Path::new("a").join("b").join("c.md");
        assert_eq!(slash_path(&path), "a/b/c.md");
    }

    #[test]
    fn test_find_matching_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for rel in [
            "pages/Content/b.md",
            "pages/Content/a.md",
            "pages/Content/pic.png",
            "pages/private.md",
            "logseq/Content/old.md",
        ] {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }

        let found = find_matching_files(&OsFilesystem, root, &default_filter()).unwrap();
        assert_eq!(
            found,
            vec![
                root.join("pages").join("Content").join("a.md"),
                root.join("pages").join("Content").join("b.md"),
            ]
        );
    }

    #[test]
    fn test_find_matching_files_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("graph");

        let err = find_matching_files(&OsFilesystem, &missing, &default_filter()).unwrap_err();
        assert!(matches!(err, ExportError::GraphPathMissing { path } if path == missing));
    }
}
