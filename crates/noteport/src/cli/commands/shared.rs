//! Helpers shared by commands that convert pages.

use std::{collections::BTreeSet, path::PathBuf, process::ExitCode};

use noteport_config::{ExportSettings, SourceSettings};
use noteport_export::{ExportOptions, SourceFilter};
use noteport_page::TransformOptions;

use crate::cli::{
    args::{ExportCommand, PageArgs},
    context::CommandContext,
};

/// Page settings after applying command-line overrides to the configuration.
pub struct PageSettings {
    /// Options for the transform pipeline.
    pub transform: TransformOptions,
    /// Attribute keys rendered without quotes.
    pub unquoted_properties: BTreeSet<String>,
}

/// Merges the page flags over the configured export settings.
pub fn page_settings(export: &ExportSettings, args: &PageArgs) -> PageSettings {
    let prefix = args
        .web_assets_path_prefix
        .as_ref()
        .unwrap_or(&export.web_assets_path_prefix);
    let unquoted = args
        .unquoted_properties
        .as_ref()
        .unwrap_or(&export.unquoted_properties);

    PageSettings {
        transform: TransformOptions {
            web_assets_path_prefix: prefix.clone(),
            file_naming: args.file_naming.unwrap_or(export.file_naming),
        },
        unquoted_properties: unquoted
            .iter()
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Builds export options from configuration and flags.
///
/// Fails with a usage error when the graph path or blog folder is set nowhere.
pub fn export_options(ctx: &CommandContext, cmd: &ExportCommand) -> Result<ExportOptions, ExitCode> {
    let export = &ctx.config.export;
    let graph_path = required_path(
        ctx,
        cmd.graph_path.as_ref(),
        export.graph_path.as_ref(),
        "graph path",
        "export.graph_path",
        "--graph-path",
    )?;
    let blog_folder = required_path(
        ctx,
        cmd.blog_folder.as_ref(),
        export.blog_folder.as_ref(),
        "blog folder",
        "export.blog_folder",
        "--blog-folder",
    )?;
    let page = page_settings(export, &cmd.page);

    Ok(ExportOptions {
        graph_path,
        blog_folder,
        assets_relative_path: cmd
            .assets_relative_path
            .clone()
            .unwrap_or_else(|| export.assets_relative_path.clone()),
        transform: page.transform,
        unquoted_properties: page.unquoted_properties,
    })
}

/// Picks a path from the flag, falling back to configuration.
fn required_path(
    ctx: &CommandContext,
    flag: Option<&PathBuf>,
    configured: Option<&PathBuf>,
    what: &str,
    key: &str,
    flag_name: &str,
) -> Result<PathBuf, ExitCode> {
    if let Some(path) = flag {
        return Ok(ctx.resolve(path));
    }
    configured.cloned().ok_or_else(|| {
        eprintln!("error: no {what} configured");
        eprintln!("set {key} in .noteport.toml or pass {flag_name}");
        ExitCode::FAILURE
    })
}

/// Builds the source filter from configuration.
pub fn source_filter(source: &SourceSettings) -> Result<SourceFilter, ExitCode> {
    let ignore = source.compile_ignore().map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })?;
    Ok(SourceFilter {
        content_marker: source.content_marker.clone(),
        extension: source.extension.clone(),
        ignore,
    })
}
