//! Error types for the noteport-export crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that abort an export.
///
/// Every variant names the file or directory involved.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The graph directory does not exist.
    #[error("graph path does not exist: {path}")]
    GraphPathMissing {
        /// Configured graph path.
        path: PathBuf,
    },

    /// Walking the graph directory failed.
    #[error("failed to list files under {path}: {source}")]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A source page could not be read.
    #[error("failed to read page {path}: {source}")]
    ReadPage {
        /// Source page path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An asset referenced by a page could not be copied.
    #[error("failed to copy asset {from} to {to}: {source}")]
    CopyAsset {
        /// Resolved asset source path.
        from: PathBuf,
        /// Destination inside the assets folder.
        to: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An output directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A rendered page could not be written.
    #[error("failed to write page {path}: {source}")]
    WritePage {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A derived output path would land outside its destination folder.
    #[error("output path {path} for page {page} escapes the destination folder")]
    PathEscapesRoot {
        /// The offending relative path.
        path: PathBuf,
        /// Source page that produced it.
        page: PathBuf,
    },
}
