//! Implementation of `noteport inspect`.

use std::process::ExitCode;

use noteport_export::{ExportError, OsFilesystem, read_page};
use noteport_page::{Page, parse_page, render, transform_page};

use super::shared::page_settings;
use crate::cli::{args::InspectCommand, context::CommandContext};

/// Shows how a single page is converted, without writing anything.
pub fn run(ctx: &CommandContext, cmd: &InspectCommand) -> ExitCode {
    let path = ctx.resolve(&cmd.file);

    let content = match read_page(&OsFilesystem, &path) {
        Ok(content) => content,
        Err(ExportError::ReadPage { source, .. }) => {
            eprintln!("error: failed to read {}: {source}", cmd.file.display());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let settings = page_settings(&ctx.config.export, &cmd.page);

    let page = parse_page(name, &content);
    let page = if cmd.raw {
        page
    } else {
        transform_page(page, &settings.transform)
    };

    if cmd.json {
        return print_json(&page);
    }

    print!("{}", render(&page, &settings.unquoted_properties));
    if !page.text.is_empty() && !page.text.ends_with('\n') {
        println!();
    }
    if !cmd.raw {
        eprintln!("output: {}", page.filename.display());
        for asset in &page.assets {
            eprintln!("asset: {asset}");
        }
    }
    ExitCode::SUCCESS
}

/// Prints a page as pretty JSON.
fn print_json(page: &Page) -> ExitCode {
    match serde_json::to_string_pretty(page) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize page: {e}");
            ExitCode::FAILURE
        }
    }
}
