//! Search command handler.

use std::path::Path;

use anyhow::Result;

use super::{compile_notes, truncate_str};
use crate::cli::SearchArgs;
use crate::cli::output::{Output, OutputFormat, SearchListing};

pub fn handle_search(args: &SearchArgs, notes_dir: &Path) -> Result<()> {
    let bundle = compile_notes(notes_dir)?;

    let mut results = bundle.search_index().search(&args.query);
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }

    match args.format {
        OutputFormat::Human => {
            if results.is_empty() {
                println!("No results found.");
                return Ok(());
            }
            for record in &results {
                println!("{}  ({})", record.title, record.path);
                if !record.excerpt.is_empty() {
                    println!("    {}", truncate_str(&record.excerpt, 80));
                }
            }
            println!();
            println!("{} result(s)", results.len());
        }
        OutputFormat::Json => {
            let listings: Vec<SearchListing> = results
                .iter()
                .map(|record| SearchListing {
                    path: record.path.as_str(),
                    title: &record.title,
                    tags: &record.tags,
                    excerpt: &record.excerpt,
                })
                .collect();
            Output::new(listings).print()?;
        }
    }
    Ok(())
}
