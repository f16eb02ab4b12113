//! Implementation of `noteport export`.

use std::process::ExitCode;

use noteport_config::format_path_for_display;
use noteport_export::{OsFilesystem, export_all};

use super::shared::{export_options, source_filter};
use crate::cli::{args::ExportCommand, context::CommandContext};

/// Exports every public page of the graph into the blog folder.
pub fn run(ctx: &CommandContext, cmd: &ExportCommand) -> ExitCode {
    let options = match export_options(ctx, cmd) {
        Ok(options) => options,
        Err(code) => return code,
    };
    let filter = match source_filter(&ctx.config.source) {
        Ok(filter) => filter,
        Err(code) => return code,
    };

    match export_all(&OsFilesystem, &options, &filter) {
        Ok(summary) => {
            println!(
                "Exported {} pages ({} assets) to {}",
                summary.pages,
                summary.assets,
                format_path_for_display(&options.blog_folder, Some(&ctx.cwd))
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
