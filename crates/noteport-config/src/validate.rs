//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::{Config, ConfigError};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No graph path is configured.
    GraphPathNotSet,
    /// The graph path does not exist.
    GraphPathMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The graph path exists but is not a directory.
    GraphPathNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// No blog folder is configured.
    BlogFolderNotSet,
    /// The ignore pattern is not a valid regular expression.
    InvalidIgnorePattern {
        /// The pattern as configured.
        pattern: String,
        /// Why it failed to compile.
        reason: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GraphPathNotSet => write!(f, "export.graph_path is not set"),
            Self::GraphPathMissing { path } => {
                write!(f, "graph path does not exist: {path}")
            }
            Self::GraphPathNotDirectory { path } => {
                write!(f, "graph path is not a directory: {path}")
            }
            Self::BlogFolderNotSet => write!(f, "export.blog_folder is not set"),
            Self::InvalidIgnorePattern { pattern, reason } => {
                write!(f, "source.ignore pattern '{pattern}' is invalid: {reason}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    match config.export.graph_path {
        None => warnings.push(ConfigWarning::GraphPathNotSet),
        Some(ref path) if !path.exists() => warnings.push(ConfigWarning::GraphPathMissing {
            path: path.display().to_string(),
        }),
        Some(ref path) if !path.is_dir() => {
            warnings.push(ConfigWarning::GraphPathNotDirectory {
                path: path.display().to_string(),
            });
        }
        Some(_) => {}
    }

    if config.export.blog_folder.is_none() {
        warnings.push(ConfigWarning::BlogFolderNotSet);
    }

    if let Err(ConfigError::InvalidIgnorePattern { pattern, source }) =
        config.source.compile_ignore()
    {
        warnings.push(ConfigWarning::InvalidIgnorePattern {
            pattern,
            reason: source.to_string(),
        });
    }

    warnings
}
