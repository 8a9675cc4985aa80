//! Check command handler.

use std::path::Path;

use anyhow::{Result, bail};

use super::compile_notes;
use crate::cli::CheckArgs;
use crate::cli::output::{BrokenLinkListing, Output, OutputFormat};

pub fn handle_check(args: &CheckArgs, notes_dir: &Path) -> Result<()> {
    let bundle = compile_notes(notes_dir)?;
    let broken = bundle.broken_links();

    match args.format {
        OutputFormat::Human => {
            if bundle.notes().is_empty() {
                println!("No notes found.");
            } else if broken.is_empty() {
                println!("All {} notes OK.", bundle.notes().len());
            } else {
                for link in broken {
                    println!("error: {link}");
                }
                println!(
                    "\nFound {} broken link(s) in {} notes",
                    broken.len(),
                    bundle.notes().len()
                );
            }
        }
        OutputFormat::Json => {
            let listings: Vec<BrokenLinkListing> = broken
                .iter()
                .map(|link| BrokenLinkListing {
                    source: link.source.as_str(),
                    target: &link.raw_target,
                })
                .collect();
            Output::new(listings).print()?;
        }
    }

    if !broken.is_empty() {
        bail!("check failed");
    }
    Ok(())
}
