//! Implementation of `noteport check`.

use std::process::ExitCode;

use noteport_config::{ConfigWarning, discover_config_files, format_path_for_display};

use crate::cli::context::CommandContext;

/// Exit codes for `noteport check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and reports problems.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found.");
    } else {
        println!("Config files (highest precedence first):");
        for path in &config_files {
            println!("  {}", format_path_for_display(path, Some(&ctx.cwd)));
        }
    }
    println!();

    let export = &ctx.config.export;
    println!("Export:");
    for (label, path) in [
        ("graph", export.graph_path.as_ref()),
        ("blog", export.blog_folder.as_ref()),
    ] {
        match path {
            Some(path) => println!(
                "  {label}: {}",
                format_path_for_display(path, Some(&ctx.cwd))
            ),
            None => println!("  {label}: (not set)"),
        }
    }
    println!();

    let warnings = ctx.config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return exit_codes::OK;
    }

    println!("Warnings ({}):", warnings.len());
    for warning in &warnings {
        println!("  - {warning}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<_> = warnings.iter().map(hint).collect();
    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for line in hints {
        println!("  - {line}");
    }
}

/// Returns the hint for a warning.
fn hint(warning: &ConfigWarning) -> &'static str {
    match warning {
        ConfigWarning::GraphPathNotSet | ConfigWarning::BlogFolderNotSet => {
            "Run 'noteport init' and fill in the [export] section, or pass the paths as flags."
        }
        ConfigWarning::GraphPathMissing { .. } => {
            "Check that graph_path points at your Logseq or Obsidian graph."
        }
        ConfigWarning::GraphPathNotDirectory { .. } => {
            "graph_path must point to a directory, not a file."
        }
        ConfigWarning::InvalidIgnorePattern { .. } => {
            "source.ignore is a regular expression; fix its syntax or set it to \"\"."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_share_a_hint() {
        assert_eq!(
            hint(&ConfigWarning::GraphPathNotSet),
            hint(&ConfigWarning::BlogFolderNotSet)
        );
    }
}
