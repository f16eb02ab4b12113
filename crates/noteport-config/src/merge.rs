//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, ExportSettings, SourceSettings,
    parse::{RawConfig, RawExportSettings, RawSourceSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory that relative paths in this config are resolved against.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Every field: first defined value wins (highest precedence)
/// - Lists (`unquoted_properties`) are replaced as a whole, never concatenated
/// - Paths are resolved against the directory of the file that set them
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let export = merge_export_settings(configs)?;
    let source = merge_source_settings(configs);
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        export,
        source,
        config_root,
    })
}

/// Merges export settings, taking the first defined value for each field.
fn merge_export_settings(configs: &[ParsedConfig]) -> Result<ExportSettings, ConfigError> {
    let mut result = ExportSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref export) = parsed.config.export {
            apply_raw_export(&mut result, export, parsed.dir())?;
        }
    }

    Ok(result)
}

/// Applies raw export settings to result, overwriting any present values.
fn apply_raw_export(
    result: &mut ExportSettings,
    raw: &RawExportSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.graph_path {
        result.graph_path = Some(resolve_path(v, config_dir)?);
    }
    if let Some(ref v) = raw.blog_folder {
        result.blog_folder = Some(resolve_path(v, config_dir)?);
    }
    if let Some(ref v) = raw.assets_relative_path {
        result.assets_relative_path = v.clone();
    }
    if let Some(ref v) = raw.web_assets_path_prefix {
        result.web_assets_path_prefix = v.clone();
    }
    if let Some(ref v) = raw.unquoted_properties {
        result.unquoted_properties = v.clone();
    }
    if let Some(v) = raw.file_naming {
        result.file_naming = v;
    }
    Ok(())
}

/// Merges source settings.
fn merge_source_settings(configs: &[ParsedConfig]) -> SourceSettings {
    let mut result = SourceSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref source) = parsed.config.source {
            apply_raw_source(&mut result, source);
        }
    }

    result
}

/// Applies raw source settings to result.
fn apply_raw_source(result: &mut SourceSettings, raw: &RawSourceSettings) {
    if let Some(ref v) = raw.content_marker {
        result.content_marker = v.clone();
    }
    if let Some(ref v) = raw.extension {
        result.extension = v.clone();
    }
    if let Some(ref v) = raw.ignore {
        result.ignore = v.clone();
    }
}
