//! Configuration system for noteport.
//!
//! noteport uses TOML configuration files named `.noteport.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.noteport.toml` files found, then loading `~/.noteport.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
use noteport_page::FileNaming;
pub use parse::{
    RawConfig, RawExportSettings, RawSourceSettings, parse_config_file, parse_config_str,
};
use regex::Regex;
pub use resolve::{format_path_for_display, resolve_path};
use serde::Serialize;
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default folder, relative to the blog folder, that assets are copied into.
pub const DEFAULT_ASSETS_RELATIVE_PATH: &str = "logseq-images";

/// Default web path prefix for rewritten asset URLs.
pub const DEFAULT_WEB_ASSETS_PATH_PREFIX: &str = "/logseq-images";

/// Default substring a source file's relative path must contain.
pub const DEFAULT_CONTENT_MARKER: &str = "Content/";

/// Default source file extension.
pub const DEFAULT_EXTENSION: &str = "md";

/// Default pattern for relative source paths that are never exported.
pub const DEFAULT_IGNORE: &str = "^(.obsidian|logseq|.git|ignore-compile)/";

/// Top-level merged configuration for noteport.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.noteport.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Export settings.
    pub export: ExportSettings,
    /// Source file selection settings.
    pub source: SourceSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.noteport.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.noteport.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.noteport.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Graph path or blog folder not set
    /// - Graph path that doesn't exist or isn't a directory
    /// - Ignore pattern that isn't a valid regular expression
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same layout as a `.noteport.toml` file. Unset paths are omitted.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableConfig {
            export: SerializableExportSettings::from(&self.export),
            source: self.source.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Settings for the `[export]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    /// Root of the note graph. Required at export time.
    pub graph_path: Option<PathBuf>,
    /// Destination folder for rendered pages. Required at export time.
    pub blog_folder: Option<PathBuf>,
    /// Folder under the blog folder that assets are copied into.
    pub assets_relative_path: String,
    /// Web path prefix for rewritten asset URLs.
    pub web_assets_path_prefix: String,
    /// Attribute keys rendered without quotes.
    pub unquoted_properties: Vec<String>,
    /// Output file naming strategy.
    pub file_naming: FileNaming,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            graph_path: None,
            blog_folder: None,
            assets_relative_path: DEFAULT_ASSETS_RELATIVE_PATH.to_string(),
            web_assets_path_prefix: DEFAULT_WEB_ASSETS_PATH_PREFIX.to_string(),
            unquoted_properties: Vec::new(),
            file_naming: FileNaming::Original,
        }
    }
}

/// Settings for the `[source]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSettings {
    /// Substring a source file's relative path must contain.
    pub content_marker: String,
    /// Extension (without the dot) of source files.
    pub extension: String,
    /// Regular expression over relative paths; matching files are skipped. Empty disables it.
    pub ignore: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            content_marker: DEFAULT_CONTENT_MARKER.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            ignore: DEFAULT_IGNORE.to_string(),
        }
    }
}

impl SourceSettings {
    /// Compiles the ignore pattern, returning `None` when it is empty.
    pub fn compile_ignore(&self) -> Result<Option<Regex>, ConfigError> {
        if self.ignore.is_empty() {
            return Ok(None);
        }
        Regex::new(&self.ignore)
            .map(Some)
            .map_err(|source| ConfigError::InvalidIgnorePattern {
                pattern: self.ignore.clone(),
                source,
            })
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableConfig {
    /// Export settings.
    export: SerializableExportSettings,
    /// Source settings.
    source: SourceSettings,
}

/// Export settings with paths rendered as strings.
#[derive(Serialize)]
struct SerializableExportSettings {
    /// Root of the note graph.
    #[serde(skip_serializing_if = "Option::is_none")]
    graph_path: Option<String>,
    /// Destination folder for rendered pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    blog_folder: Option<String>,
    /// Folder under the blog folder that assets are copied into.
    assets_relative_path: String,
    /// Web path prefix for rewritten asset URLs.
    web_assets_path_prefix: String,
    /// Attribute keys rendered without quotes.
    unquoted_properties: Vec<String>,
    /// Output file naming strategy.
    file_naming: FileNaming,
}

impl From<&ExportSettings> for SerializableExportSettings {
    fn from(export: &ExportSettings) -> Self {
        Self {
            graph_path: export
                .graph_path
                .as_ref()
                .map(|p| p.display().to_string()),
            blog_folder: export
                .blog_folder
                .as_ref()
                .map(|p| p.display().to_string()),
            assets_relative_path: export.assets_relative_path.clone(),
            web_assets_path_prefix: export.web_assets_path_prefix.clone(),
            unquoted_properties: export.unquoted_properties.clone(),
            file_naming: export.file_naming,
        }
    }
}
