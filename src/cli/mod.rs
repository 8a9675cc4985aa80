//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logger;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::export::BrokenLinkHandling;
use output::OutputFormat;

/// notegraph - compile a folder of markdown notes into a linked site
#[derive(Parser, Debug)]
#[command(name = "notegraph", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile the notes and write a static site
    Build(BuildArgs),

    /// Report links to missing notes
    Check(CheckArgs),

    /// Show every note with its links and backlinks
    Graph(GraphArgs),

    /// Show notes that link to a given note
    Backlinks(BacklinksArgs),

    /// List all tags with note counts
    Tags(TagsArgs),

    /// Search note titles, tags and text
    Search(SearchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `build` command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Output directory for the generated site
    pub output: PathBuf,

    /// Site title shown on every page
    #[arg(long)]
    pub site_title: Option<String>,

    /// URL prefix for links in the search index (e.g. /notes)
    #[arg(long)]
    pub base_url: Option<String>,

    /// CSS theme (default, dark, or path to CSS file)
    #[arg(long)]
    pub theme: Option<String>,

    /// Custom template for note pages
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// How to draw links to missing notes
    #[arg(long, value_enum)]
    pub broken_links: Option<BrokenLinkHandling>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Note path relative to the notes directory (e.g. guides/setup.md)
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query (every word must match)
    pub query: String,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
