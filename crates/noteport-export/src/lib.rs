//! Exporting a note graph into a blog.
//!
//! This crate is the I/O side of noteport. It walks a graph for publishable pages, runs
//! each through the `noteport-page` pipeline, copies the images they reference and writes
//! the rendered documents into the blog folder. All file access goes through the
//! [`Filesystem`] trait.

#![warn(missing_docs)]

mod discovery;
mod error;
mod export;
mod fs;

pub use discovery::{SourceFilter, find_matching_files};
pub use error::ExportError;
pub use export::{
    ExportOptions, ExportSummary, ExportedPage, copy_assets, export_all, export_page,
    read_page,
};
pub use fs::{Filesystem, OsFilesystem};
