//! Configuration file parsing.
//!
//! Parses individual `.noteport.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use noteport_page::FileNaming;
use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Export settings section.
    pub export: Option<RawExportSettings>,
    /// Source selection section.
    pub source: Option<RawSourceSettings>,
}

/// Raw export settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExportSettings {
    /// Root of the note graph, relative to the config file.
    pub graph_path: Option<String>,
    /// Destination folder, relative to the config file.
    pub blog_folder: Option<String>,
    /// Folder under the blog folder that assets are copied into.
    pub assets_relative_path: Option<String>,
    /// Web path prefix for rewritten asset URLs.
    pub web_assets_path_prefix: Option<String>,
    /// Attribute keys rendered without quotes.
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub unquoted_properties: Option<Vec<String>>,
    /// Output file naming strategy.
    pub file_naming: Option<FileNaming>,
}

/// Raw source selection settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSourceSettings {
    /// Substring a source file's relative path must contain.
    pub content_marker: Option<String>,
    /// Source file extension.
    pub extension: Option<String>,
    /// Ignore pattern over relative paths.
    pub ignore: Option<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// This is used during discovery to stop traversal at root configs.
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.export.is_none());
        assert!(config.source.is_none());
    }

    #[test]
    fn test_parse_full_export_section() {
        let toml = r#"
[export]
graph_path = "~/notes"
blog_folder = "../blog/content"
assets_relative_path = "images"
web_assets_path_prefix = "/images"
unquoted_properties = ["date", "public"]
file_naming = "slug"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let export = config.export.unwrap();
        assert_eq!(export.graph_path.as_deref(), Some("~/notes"));
        assert_eq!(export.blog_folder.as_deref(), Some("../blog/content"));
        assert_eq!(export.assets_relative_path.as_deref(), Some("images"));
        assert_eq!(export.web_assets_path_prefix.as_deref(), Some("/images"));
        assert_eq!(
            export.unquoted_properties,
            Some(vec!["date".to_string(), "public".to_string()])
        );
        assert_eq!(export.file_naming, Some(FileNaming::Slug));
    }

    #[test]
    fn test_parse_single_unquoted_property() {
        let toml = r#"
[export]
unquoted_properties = "date"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(
            config.export.unwrap().unquoted_properties,
            Some(vec!["date".to_string()])
        );
    }

    #[test]
    fn test_parse_partial_export_section() {
        let toml = r#"
[export]
graph_path = "notes"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let export = config.export.unwrap();
        assert_eq!(export.graph_path.as_deref(), Some("notes"));
        assert!(export.blog_folder.is_none());
        assert!(export.unquoted_properties.is_none());
        assert!(export.file_naming.is_none());
    }

    #[test]
    fn test_parse_source_section() {
        let toml = r#"
[source]
content_marker = "Public/"
extension = "markdown"
ignore = "^drafts/"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let source = config.source.unwrap();
        assert_eq!(source.content_marker.as_deref(), Some("Public/"));
        assert_eq!(source.extension.as_deref(), Some("markdown"));
        assert_eq!(source.ignore.as_deref(), Some("^drafts/"));
    }

    #[test]
    fn test_parse_unknown_keys_ignored() {
        let toml = r#"
theme = "dark"

[export]
graph_path = "notes"
colour = "blue"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.export.unwrap().graph_path.as_deref(), Some("notes"));
    }

    #[test]
    fn test_parse_invalid_file_naming() {
        let toml = r#"
[export]
file_naming = "random"
"#;
        let result = parse_config_str(toml, Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config_str("[export\n", Path::new("bad.toml"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_parse_config_file_missing() {
        let dir = TestDir::new();
        let result = parse_config_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_is_root_config() {
        let dir = TestDir::new();
        let root = dir.create_root_config("a");
        let plain = dir.create_config("b");
        let broken = dir.create_config_with_content("c", "root = [");

        assert!(is_root_config(&root));
        assert!(!is_root_config(&plain));
        assert!(!is_root_config(&broken));
        assert!(!is_root_config(&dir.path().join("missing.toml")));
    }
}
