//! Exporting pages and their assets into the blog folder.

use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

use noteport_page::{TransformOptions, parse_page, render, transform_page};
use tracing::{debug, info, warn};

use crate::{ExportError, Filesystem, SourceFilter, find_matching_files};

/// Everything needed to export pages from a graph into a blog.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Root of the note graph.
    pub graph_path: PathBuf,
    /// Folder rendered pages are written into.
    pub blog_folder: PathBuf,
    /// Folder, relative to `blog_folder`, that assets are copied into.
    pub assets_relative_path: String,
    /// Options for the page transform pipeline.
    pub transform: TransformOptions,
    /// Attribute keys rendered without quotes.
    pub unquoted_properties: BTreeSet<String>,
}

impl ExportOptions {
    /// Folder assets are copied into.
    pub fn assets_folder(&self) -> PathBuf {
        self.blog_folder.join(&self.assets_relative_path)
    }
}

/// The outcome of exporting one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPage {
    /// Source page that was read.
    pub source: PathBuf,
    /// File the rendered page was written to.
    pub destination: PathBuf,
    /// Destinations of the copied assets, in reference order.
    pub assets: Vec<PathBuf>,
}

/// Totals for a whole export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Pages written.
    pub pages: usize,
    /// Assets copied. An asset referenced twice is counted twice.
    pub assets: usize,
}

/// Reads a source page as text.
///
/// Invalid UTF-8 does not fail the read: offending bytes are replaced and a warning is
/// logged.
pub fn read_page(fs: &impl Filesystem, source: &Path) -> Result<String, ExportError> {
    let bytes = fs.read(source).map_err(|err| ExportError::ReadPage {
        path: source.to_path_buf(),
        source: err,
    })?;
    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            warn!(page = %source.display(), "page is not valid UTF-8, replacing invalid bytes");
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// Exports a single page.
///
/// Reads `source`, runs it through the transform pipeline, copies the assets it
/// references and writes the rendered document under the blog folder.
pub fn export_page(
    fs: &impl Filesystem,
    source: &Path,
    options: &ExportOptions,
) -> Result<ExportedPage, ExportError> {
    let content = read_page(fs, source)?;
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let page = transform_page(parse_page(name, &content), &options.transform);

    if !is_contained(&page.filename) {
        return Err(ExportError::PathEscapesRoot {
            path: page.filename,
            page: source.to_path_buf(),
        });
    }

    let assets = copy_assets(fs, source, &page.assets, options)?;

    let destination = options.blog_folder.join(&page.filename);
    if let Some(parent) = destination.parent() {
        fs.create_dir_all(parent)
            .map_err(|err| ExportError::CreateDir {
                path: parent.to_path_buf(),
                source: err,
            })?;
    }
    let document = render(&page, &options.unquoted_properties);
    fs.write(&destination, document.as_bytes())
        .map_err(|err| ExportError::WritePage {
            path: destination.clone(),
            source: err,
        })?;

    info!(page = %page.filename.display(), assets = assets.len(), "exported page");
    Ok(ExportedPage {
        source: source.to_path_buf(),
        destination,
        assets,
    })
}

/// Copies the assets referenced by a page into the assets folder.
///
/// Each asset path is resolved against the directory of `page_source` and copied under its
/// base name, so assets with the same name overwrite one another. Every base name is
/// checked before anything is created. The assets folder is created even when there is
/// nothing to copy.
pub fn copy_assets(
    fs: &impl Filesystem,
    page_source: &Path,
    assets: &[String],
    options: &ExportOptions,
) -> Result<Vec<PathBuf>, ExportError> {
    let names = assets
        .iter()
        .map(|asset| {
            let relative = Path::new(asset);
            match relative.file_name() {
                Some(name) if is_contained(Path::new(name)) => Ok((relative, name)),
                _ => Err(ExportError::PathEscapesRoot {
                    path: relative.to_path_buf(),
                    page: page_source.to_path_buf(),
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let assets_folder = options.assets_folder();
    fs.create_dir_all(&assets_folder)
        .map_err(|err| ExportError::CreateDir {
            path: assets_folder.clone(),
            source: err,
        })?;

    let page_dir = page_source.parent().unwrap_or_else(|| Path::new(""));
    let mut copied = Vec::with_capacity(names.len());
    for (relative, name) in names {
        let from = page_dir.join(relative);
        let to = assets_folder.join(name);
        fs.copy(&from, &to).map_err(|err| ExportError::CopyAsset {
            from: from.clone(),
            to: to.clone(),
            source: err,
        })?;
        debug!(from = %from.display(), to = %to.display(), "copied asset");
        copied.push(to);
    }
    Ok(copied)
}

/// Exports every page in the graph accepted by `filter`.
///
/// Pages are processed one at a time in walk order. The first failure stops the run; files
/// written before it stay on disk.
pub fn export_all(
    fs: &impl Filesystem,
    options: &ExportOptions,
    filter: &SourceFilter,
) -> Result<ExportSummary, ExportError> {
    let sources = find_matching_files(fs, &options.graph_path, filter)?;
    info!(
        count = sources.len(),
        graph = %options.graph_path.display(),
        "found pages to export"
    );

    let mut summary = ExportSummary::default();
    for source in &sources {
        let exported = export_page(fs, source, options)?;
        summary.pages += 1;
        summary.assets += exported.assets.len();
    }
    Ok(summary)
}

/// Checks that a relative path stays inside whatever folder it is joined onto.
fn is_contained(path: &Path) -> bool {
    let mut components = path.components().peekable();
    components.peek().is_some()
        && components.all(|component| matches!(component, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use noteport_page::FileNaming;
    use regex::Regex;

    use super::*;
    use crate::OsFilesystem;

    /// A graph and blog folder inside a temporary directory.
    struct Fixture {
        /// Keeps the directory alive.
        _tmp: tempfile::TempDir,
        /// Export options pointing into the directory.
        options: ExportOptions,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let options = ExportOptions {
                graph_path: tmp.path().join("graph"),
                blog_folder: tmp.path().join("blog"),
                assets_relative_path: "images".into(),
                transform: TransformOptions::new("/images"),
                unquoted_properties: BTreeSet::from(["date".to_string()]),
            };
            fs::create_dir_all(&options.graph_path).unwrap();
            Self { _tmp: tmp, options }
        }

        fn graph_file(&self, rel: &str, content: &[u8]) -> PathBuf {
            let path = self.options.graph_path.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            path
        }

        fn blog_file(&self, rel: &str) -> String {
            fs::read_to_string(self.options.blog_folder.join(rel)).unwrap()
        }
    }

    fn filter() -> SourceFilter {
        SourceFilter {
            content_marker: "Content/".into(),
            extension: "md".into(),
            ignore: Some(Regex::new("^(.obsidian|logseq|.git|ignore-compile)/").unwrap()),
        }
    }

    #[test]
    fn test_export_page_writes_rendered_document() {
        let fx = Fixture::new();
        let source = fx.graph_file(
            "pages/Content/note.md",
            b"---\ntitle: \nfolder: posts\ndate: 2024-01-02\n---\n- Hello\n\t- World\n",
        );

        let exported = export_page(&OsFilesystem, &source, &fx.options).unwrap();
        assert_eq!(
            exported.destination,
            fx.options.blog_folder.join("posts").join("note.md")
        );
        assert!(exported.assets.is_empty());
        assert_eq!(
            fx.blog_file("posts/note.md"),
            "---\ndate: 2024-01-02\nfolder: \"posts\"\ntitle: \"note\"\n---\n\nHello\n\n- World\n"
        );
        assert!(fx.options.assets_folder().is_dir());
    }

    #[test]
    fn test_export_page_copies_assets_by_base_name() {
        let fx = Fixture::new();
        fx.graph_file("assets/shot.png", b"png");
        fx.graph_file("pages/cover.jpg", b"jpg");
        let source = fx.graph_file(
            "pages/Content/post.md",
            b"---\nimage: ../cover.jpg\n---\n- ![s](../../assets/shot.png)\n",
        );

        let exported = export_page(&OsFilesystem, &source, &fx.options).unwrap();
        let assets = fx.options.assets_folder();
        assert_eq!(
            exported.assets,
            vec![assets.join("shot.png"), assets.join("cover.jpg")]
        );
        assert_eq!(fs::read(assets.join("shot.png")).unwrap(), b"png");
        assert_eq!(fs::read(assets.join("cover.jpg")).unwrap(), b"jpg");

        let document = fx.blog_file("post.md");
        assert!(document.contains("image: \"/images/cover.jpg\""));
        assert!(document.contains("![s](/images/shot.png)"));
    }

    #[test]
    fn test_export_page_missing_asset_fails() {
        let fx = Fixture::new();
        let source = fx.graph_file("Content/post.md", b"![x](./missing.png)\n");

        let err = export_page(&OsFilesystem, &source, &fx.options).unwrap_err();
        match err {
            ExportError::CopyAsset { from, .. } => {
                assert!(from.ends_with("missing.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!fx.options.blog_folder.join("post.md").exists());
    }

    #[test]
    fn test_export_page_rejects_escaping_folder() {
        let fx = Fixture::new();
        let source = fx.graph_file("Content/evil.md", b"---\nfolder: ../../outside\n---\nbody\n");

        let err = export_page(&OsFilesystem, &source, &fx.options).unwrap_err();
        assert!(matches!(err, ExportError::PathEscapesRoot { .. }));
    }

    #[test]
    fn test_export_page_rejects_asset_without_base_name() {
        let fx = Fixture::new();
        fx.graph_file("ok.png", b"png");
        let source = fx.graph_file("Content/evil.md", b"![ok](../ok.png)\n![a](../..)\n");

        let err = export_page(&OsFilesystem, &source, &fx.options).unwrap_err();
        match err {
            ExportError::PathEscapesRoot { path, page } => {
                assert_eq!(path, PathBuf::from("../.."));
                assert_eq!(page, source);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!fx.options.blog_folder.exists());
    }

    #[test]
    fn test_export_page_slug_naming() {
        let mut fx = Fixture::new();
        fx.options.transform.file_naming = FileNaming::Slug;
        let source = fx.graph_file("Content/My Post.md", b"---\nslug: hello-world\n---\nbody\n");

        let exported = export_page(&OsFilesystem, &source, &fx.options).unwrap();
        assert_eq!(
            exported.destination,
            fx.options.blog_folder.join("hello-world.md")
        );
    }

    #[test]
    fn test_export_page_lossy_utf8() {
        let fx = Fixture::new();
        let source = fx.graph_file("Content/bad.md", b"caf\xe9\n");

        export_page(&OsFilesystem, &source, &fx.options).unwrap();
        assert!(fx.blog_file("bad.md").ends_with("caf\u{fffd}\n"));
    }

    #[test]
    fn test_read_page_lossy_utf8() {
        let fx = Fixture::new();
        let source = fx.graph_file("Content/bad.md", b"- caf\xe9\n");

        assert_eq!(read_page(&OsFilesystem, &source).unwrap(), "- caf\u{fffd}\n");
    }

    #[test]
    fn test_export_page_missing_source() {
        let fx = Fixture::new();
        let source = fx.options.graph_path.join("Content/none.md");

        let err = export_page(&OsFilesystem, &source, &fx.options).unwrap_err();
        assert!(matches!(err, ExportError::ReadPage { path, .. } if path == source));
    }

    #[test]
    fn test_export_all_counts_pages_and_assets() {
        let fx = Fixture::new();
        fx.graph_file("pages/Content/pic.png", b"png");
        fx.graph_file("pages/Content/a.md", b"![p](./pic.png)\n");
        fx.graph_file("pages/Content/b.md", b"- plain\n");
        fx.graph_file("pages/draft.md", b"not published\n");
        fx.graph_file("logseq/Content/backup.md", b"old\n");

        let summary = export_all(&OsFilesystem, &fx.options, &filter()).unwrap();
        assert_eq!(summary, ExportSummary { pages: 2, assets: 1 });
        assert!(fx.options.blog_folder.join("a.md").is_file());
        assert!(fx.options.blog_folder.join("b.md").is_file());
        assert!(!fx.options.blog_folder.join("draft.md").exists());
        assert!(!fx.options.blog_folder.join("backup.md").exists());
    }

    #[test]
    fn test_export_all_stops_at_first_failure() {
        let fx = Fixture::new();
        fx.graph_file("Content/a.md", b"fine\n");
        fx.graph_file("Content/b.md", b"![x](./gone.png)\n");
        fx.graph_file("Content/c.md", b"never reached\n");

        let err = export_all(&OsFilesystem, &fx.options, &filter()).unwrap_err();
        assert!(matches!(err, ExportError::CopyAsset { .. }));
        assert!(fx.options.blog_folder.join("a.md").is_file());
        assert!(!fx.options.blog_folder.join("c.md").exists());
    }

    #[test]
    fn test_export_all_missing_graph() {
        let mut fx = Fixture::new();
        fx.options.graph_path = fx.options.graph_path.join("nope");

        let err = export_all(&OsFilesystem, &fx.options, &filter()).unwrap_err();
        assert!(matches!(err, ExportError::GraphPathMissing { .. }));
    }

    #[test]
    fn test_is_contained() {
        assert!(is_contained(Path::new("note.md")));
        assert!(is_contained(&Path::new("posts").join("note.md")));
        assert!(!is_contained(Path::new("")));
        assert!(!is_contained(&Path::new("..").join("note.md")));
        assert!(!is_contained(&Path::new("posts").join("..").join("..").join("x.md")));
        assert!(!is_contained(Path::new("/etc/passwd")));
    }
}
