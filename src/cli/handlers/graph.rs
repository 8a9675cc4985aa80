//! Link graph command handlers (graph, backlinks).

use std::path::Path;

use anyhow::{Result, bail};

use super::{compile_notes, parse_note_arg, truncate_str};
use crate::cli::output::{BacklinkListing, GraphListing, Output, OutputFormat};
use crate::cli::{BacklinksArgs, GraphArgs};

pub fn handle_graph(args: &GraphArgs, notes_dir: &Path) -> Result<()> {
    let bundle = compile_notes(notes_dir)?;
    let graph = bundle.link_graph();

    match args.format {
        OutputFormat::Human => {
            if bundle.notes().is_empty() {
                println!("No notes found.");
                return Ok(());
            }
            for note in bundle.notes() {
                println!("{}  ({})", note.path(), note.title());
                for target in graph.forward(note.path()) {
                    println!("  -> {target}");
                }
                for source in graph.backlinks(note.path()) {
                    println!("  <- {source}");
                }
            }
            println!();
            println!("{} notes, {} links", graph.len(), graph.edge_count());
        }
        OutputFormat::Json => {
            let listings: Vec<GraphListing> = bundle
                .notes()
                .iter()
                .map(|note| GraphListing {
                    path: note.path().as_str(),
                    title: note.title(),
                    links: graph.forward(note.path()).iter().map(|p| p.as_str()).collect(),
                    backlinks: graph.backlinks(note.path()).iter().map(|p| p.as_str()).collect(),
                })
                .collect();
            Output::new(listings).print()?;
        }
    }
    Ok(())
}

pub fn handle_backlinks(args: &BacklinksArgs, notes_dir: &Path) -> Result<()> {
    let path = parse_note_arg(&args.note)?;
    let bundle = compile_notes(notes_dir)?;

    if !bundle.link_graph().contains(&path) {
        bail!("Note not found: {}", path);
    }

    let backlinks: Vec<_> = bundle.backlink_notes(&path).collect();

    match args.format {
        OutputFormat::Human => {
            if backlinks.is_empty() {
                println!("No backlinks found.");
            } else {
                println!("{:<40}  {:<40}", "Path", "Title");
                println!("{:<40}  {:<40}", "-".repeat(40), "-".repeat(40));
                for note in &backlinks {
                    println!(
                        "{:<40}  {:<40}",
                        truncate_str(note.path().as_str(), 40),
                        truncate_str(note.title(), 40)
                    );
                }
                println!();
                println!("{} backlink(s)", backlinks.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<BacklinkListing> = backlinks
                .iter()
                .map(|note| BacklinkListing {
                    path: note.path().as_str(),
                    title: note.title(),
                })
                .collect();
            Output::new(listings).print()?;
        }
    }
    Ok(())
}
