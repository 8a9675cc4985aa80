//! notegraph - compile a folder of markdown notes into a linked, searchable site
//!
//! The [`compile`] module turns raw note files into a [`compile::Bundle`]
//! (notes, link graph with backlinks, tag index, search records); the
//! [`export`] module renders a bundle as a static site.

pub mod cli;
pub mod compile;
pub mod domain;
pub mod export;
pub mod infra;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_backlinks, handle_build, handle_check, handle_completions, handle_graph,
        handle_search, handle_tags,
    },
    logger::init_logger,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet, cli.no_color);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load()?;
    let notes_dir = config.notes_dir(cli.dir.as_ref());

    match &cli.command {
        Command::Build(args) => handle_build(args, &notes_dir, &config),
        Command::Check(args) => handle_check(args, &notes_dir),
        Command::Graph(args) => handle_graph(args, &notes_dir),
        Command::Backlinks(args) => handle_backlinks(args, &notes_dir),
        Command::Tags(args) => handle_tags(args, &notes_dir),
        Command::Search(args) => handle_search(args, &notes_dir),
        Command::Completions(args) => handle_completions(args),
    }
}
