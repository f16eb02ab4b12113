//! Clap argument definitions for the `noteport` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use noteport_page::FileNaming;

/// Parse a file naming strategy from a string.
fn parse_file_naming(s: &str) -> Result<FileNaming, String> {
    s.parse()
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "noteport")]
#[command(about = "Publish Logseq and Obsidian pages as blog posts")]
#[command(version)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that override how pages are transformed and rendered.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Web path prefix for rewritten image links [default: /logseq-images]
    #[arg(long)]
    pub web_assets_path_prefix: Option<String>,

    /// Comma-separated frontmatter keys written without quotes
    #[arg(long, value_delimiter = ',')]
    pub unquoted_properties: Option<Vec<String>>,

    /// Output file naming: original or slug [default: original]
    #[arg(long, value_parser = parse_file_naming)]
    pub file_naming: Option<FileNaming>,
}

/// Arguments for `noteport export`.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportCommand {
    /// Root of the Logseq or Obsidian graph
    #[arg(long)]
    pub graph_path: Option<PathBuf>,

    /// Blog content folder to write pages into
    #[arg(long)]
    pub blog_folder: Option<PathBuf>,

    /// Folder under the blog folder for copied images [default: logseq-images]
    #[arg(long)]
    pub assets_relative_path: Option<String>,

    /// Page transform and rendering overrides.
    #[command(flatten)]
    pub page: PageArgs,
}

/// Arguments for `noteport inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectCommand {
    /// Page to inspect
    pub file: PathBuf,

    /// Print the page as JSON instead of rendering it
    #[arg(long)]
    pub json: bool,

    /// Show the page as parsed, before any transforms
    #[arg(long)]
    pub raw: bool,

    /// Page transform and rendering overrides.
    #[command(flatten)]
    pub page: PageArgs,
}

/// Arguments for `noteport init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.noteport.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `noteport` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Export every public page in the graph to the blog
    #[command(after_help = "\
A page is exported when its path inside the graph contains the content marker
(default \"Content/\"), has the page extension, and does not match the ignore
pattern. Settings come from .noteport.toml files; flags override them.

EXAMPLES:
  noteport export --graph-path ~/notes --blog-folder ./content/posts
  noteport export --unquoted-properties date,public
  noteport export --file-naming slug")]
    Export(ExportCommand),

    /// Show how a single page is converted
    Inspect(InspectCommand),

    /// Initialize noteport configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}
