//! Path resolution for configured folders.
//!
//! Resolves relative and tilde-prefixed paths from config files to absolute paths, and
//! formats paths compactly for display.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path against the directory of the config file that set it.
///
/// Handles three cases:
/// - Tilde paths (`~/notes`) - expanded to home directory
/// - Relative paths (`./blog`, `../shared`) - joined onto `config_dir`
/// - Absolute paths - returned as-is
///
/// The path does not need to exist; the blog folder is created on export.
pub fn resolve_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Formats a path for display.
///
/// Paths under `base` are shown relative to it, paths under the home directory are shown
/// with a `~` prefix, and anything else is shown in full.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base
        && let Some(relative) = pathdiff::diff_paths(path, base)
        && !relative.starts_with("..")
        && relative.is_relative()
    {
        if relative.as_os_str().is_empty() {
            return String::from(".");
        }
        return relative.display().to_string();
    }

    if let Some(dirs) = BaseDirs::new()
        && let Ok(rest) = path.strip_prefix(dirs.home_dir())
    {
        return Path::new("~").join(rest).display().to_string();
    }

    path.display().to_string()
}

/// Expands a tilde prefix to the home directory.
///
/// - `~` alone becomes the home directory
/// - `~/foo` becomes home directory joined with `foo`
/// - Paths not starting with `~` are returned unchanged
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    fn home() -> PathBuf {
        BaseDirs::new().unwrap().home_dir().to_path_buf()
    }

    #[test]
    fn test_resolve_relative_path() {
        let dir = TestDir::new();
        let resolved = resolve_path("./blog", dir.path()).unwrap();
        assert_eq!(resolved, dir.path().join("./blog"));
    }

    #[test]
    fn test_resolve_parent_relative_path() {
        let dir = TestDir::new();
        let project = dir.create_dir("project");

        let resolved = resolve_path("../notes", &project).unwrap();
        assert_eq!(resolved, project.join("../notes"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let dir = TestDir::new();
        let graph = dir.create_dir("graph");

        let resolved = resolve_path(graph.to_str().unwrap(), Path::new("/other")).unwrap();
        assert_eq!(resolved, graph);
    }

    #[test]
    fn test_resolve_missing_path_is_not_an_error() {
        let dir = TestDir::new();
        let resolved = resolve_path("not/yet/created", dir.path()).unwrap();
        assert!(!resolved.exists());
    }

    #[test]
    fn test_resolve_tilde_path() {
        let resolved = resolve_path("~/notes", Path::new("/ignored")).unwrap();
        assert_eq!(resolved, home().join("notes"));
    }

    #[test]
    fn test_expand_tilde_alone() {
        assert_eq!(expand_tilde("~").unwrap(), home());
    }

    #[test]
    fn test_expand_tilde_not_at_start() {
        assert_eq!(expand_tilde("foo/~/bar").unwrap(), PathBuf::from("foo/~/bar"));
        assert_eq!(expand_tilde("~user/x").unwrap(), PathBuf::from("~user/x"));
    }

    #[test]
    fn test_format_relative_to_base() {
        let dir = TestDir::new();
        let path = dir.path().join("blog/content");
        assert_eq!(
            format_path_for_display(&path, Some(dir.path())),
            Path::new("blog").join("content").display().to_string()
        );
        assert_eq!(format_path_for_display(dir.path(), Some(dir.path())), ".");
    }

    #[test]
    fn test_format_outside_base_not_relative() {
        let dir = TestDir::new();
        let base = dir.create_dir("a");
        let path = dir.create_dir("b");

        let shown = format_path_for_display(&path, Some(&base));
        assert!(!shown.starts_with(".."));
    }

    #[test]
    fn test_format_home_uses_tilde() {
        let path = home().join("notes");
        assert_eq!(
            format_path_for_display(&path, None),
            Path::new("~").join("notes").display().to_string()
        );
    }
}
