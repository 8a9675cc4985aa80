//! Handler for the `build` command.

use std::path::Path;

use anyhow::{Context, Result};

use super::compile_notes;
use crate::cli::BuildArgs;
use crate::cli::config::Config;
use crate::cli::output::{BuildSummary, Output, OutputFormat};
use crate::export::{DEFAULT_SITE_TITLE, SiteConfig, generate_site};

/// Compiles the notes and renders the site into `args.output`.
pub fn handle_build(args: &BuildArgs, notes_dir: &Path, config: &Config) -> Result<()> {
    let bundle = compile_notes(notes_dir)?;

    // CLI flags win over the config file.
    let site_title = args
        .site_title
        .as_deref()
        .or(config.site_title.as_deref())
        .unwrap_or(DEFAULT_SITE_TITLE);
    let base_url = args
        .base_url
        .as_deref()
        .or(config.base_url.as_deref())
        .unwrap_or("");
    let site_config = SiteConfig {
        site_title,
        base_url,
        theme: args.theme.as_deref().or(config.theme.as_deref()),
        note_template: args.template.as_deref(),
        broken_links: args
            .broken_links
            .or(config.broken_links)
            .unwrap_or_default(),
    };

    let result = generate_site(&bundle, &args.output, &site_config)
        .with_context(|| format!("failed to write site to {}", args.output.display()))?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "Generated site with {} notes and {} tag pages at {}",
                result.notes_written,
                result.tag_pages,
                args.output.display()
            );
            if !bundle.broken_links().is_empty() {
                println!(
                    "{} broken link(s); run `notegraph check` for details",
                    bundle.broken_links().len()
                );
            }
        }
        OutputFormat::Json => {
            Output::new(BuildSummary {
                output: args.output.display().to_string(),
                notes: result.notes_written,
                tag_pages: result.tag_pages,
                broken_links: bundle.broken_links().len(),
            })
            .print()?;
        }
    }
    Ok(())
}
