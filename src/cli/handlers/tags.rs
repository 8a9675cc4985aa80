//! Tags command handler.

use std::path::Path;

use anyhow::Result;

use super::compile_notes;
use crate::cli::TagsArgs;
use crate::cli::output::{Output, OutputFormat, TagListing};

pub fn handle_tags(args: &TagsArgs, notes_dir: &Path) -> Result<()> {
    let bundle = compile_notes(notes_dir)?;
    let tags = bundle.tag_index();

    match args.format {
        OutputFormat::Human => {
            if tags.is_empty() {
                println!("No tags found.");
            } else {
                for bucket in tags.iter() {
                    println!("{} ({})", bucket.name(), bucket.len());
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TagListing> = tags
                .iter()
                .map(|bucket| TagListing {
                    name: bucket.name(),
                    count: bucket.len(),
                })
                .collect();
            Output::new(listings).print()?;
        }
    }
    Ok(())
}
