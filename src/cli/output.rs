//! Output format types for CLI commands.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Prints the wrapped data as pretty JSON on stdout.
    pub fn print(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// A tag with the number of notes carrying it.
#[derive(Debug, Serialize)]
pub struct TagListing<'a> {
    pub name: &'a str,
    pub count: usize,
}

/// One search hit.
#[derive(Debug, Serialize)]
pub struct SearchListing<'a> {
    pub path: &'a str,
    pub title: &'a str,
    pub tags: &'a [String],
    pub excerpt: &'a str,
}

/// A note with its links in both directions.
#[derive(Debug, Serialize)]
pub struct GraphListing<'a> {
    pub path: &'a str,
    pub title: &'a str,
    pub links: Vec<&'a str>,
    pub backlinks: Vec<&'a str>,
}

/// A note that links to the queried note.
#[derive(Debug, Serialize)]
pub struct BacklinkListing<'a> {
    pub path: &'a str,
    pub title: &'a str,
}

/// A link to a missing note.
#[derive(Debug, Serialize)]
pub struct BrokenLinkListing<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

/// Summary of a site build.
#[derive(Debug, Serialize)]
pub struct BuildSummary {
    pub output: String,
    pub notes: usize,
    pub tag_pages: usize,
    pub broken_links: usize,
}
