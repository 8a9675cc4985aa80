//! Static site generation from a compiled bundle.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use minijinja::{Value, context};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::compile::Bundle;
use crate::domain::{Note, Tag};
use crate::export::assets::SEARCH_JS;
use crate::export::links::{BrokenLinkHandling, LinkResolver, LinkResolverOptions};
use crate::export::template::{Page, SiteTemplates, trusted_html, trusted_url};
use crate::export::theme::get_theme_css;
use crate::infra::{join_base_url, relative_url, root_prefix, unique_slugs, write_file_atomic};

/// Site title used when none is configured.
pub const DEFAULT_SITE_TITLE: &str = "My Knowledge Base";

/// Pages the generator writes besides note pages.
const GENERATED_PAGES: [&str; 3] = ["index.html", "search.html", "tags/index.html"];

/// Tag slugs that would collide with the tag list page.
const RESERVED_TAG_SLUGS: [&str; 1] = ["index"];

/// Configuration for site generation.
#[derive(Debug, Clone)]
pub struct SiteConfig<'a> {
    /// Site title shown in the header of every page.
    pub site_title: &'a str,
    /// Prefix for URLs in the search index (e.g. `/notes`).
    pub base_url: &'a str,
    /// Theme name or path to CSS file.
    pub theme: Option<&'a str>,
    /// Custom template for note pages.
    pub note_template: Option<&'a Path>,
    /// How links to missing notes are drawn.
    pub broken_links: BrokenLinkHandling,
}

impl Default for SiteConfig<'_> {
    fn default() -> Self {
        Self {
            site_title: DEFAULT_SITE_TITLE,
            base_url: "",
            theme: None,
            note_template: None,
            broken_links: BrokenLinkHandling::default(),
        }
    }
}

/// Result of site generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteResult {
    /// Number of note pages written.
    pub notes_written: usize,
    /// Number of per-tag pages written.
    pub tag_pages: usize,
    /// Number of links to missing notes drawn in note pages.
    pub broken_links: usize,
}

/// A link to a note page.
#[derive(Serialize)]
struct NoteLink {
    title: String,
    url: Value,
}

/// A link to a tag page.
#[derive(Serialize)]
struct TagLink {
    name: String,
    url: Value,
    count: usize,
}

/// A note in a listing.
#[derive(Serialize)]
struct NoteSummary {
    title: String,
    url: Value,
    excerpt: String,
    modified: Option<String>,
    tags: Vec<TagLink>,
}

/// One entry of `search-index.json`.
#[derive(Serialize)]
struct SearchEntry<'a> {
    title: &'a str,
    url: String,
    tags: Vec<&'a str>,
    excerpt: &'a str,
    content: &'a str,
}

/// Shared state for rendering every page of one site.
struct SiteWriter<'a> {
    bundle: &'a Bundle,
    output_dir: &'a Path,
    config: &'a SiteConfig<'a>,
    templates: SiteTemplates<'a>,
    /// Tag key to the file name (without extension) of its page.
    tag_slugs: BTreeMap<String, String>,
    generated: String,
}

/// Generates a static site from a compiled bundle.
///
/// Writes one page per note plus the note list, tag pages, search page,
/// search index and assets. Files are replaced atomically; other files in
/// the output directory are left alone.
pub fn generate_site(bundle: &Bundle, output_dir: &Path, config: &SiteConfig) -> Result<SiteResult> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let custom_template = match config.note_template {
        Some(p) => Some(
            std::fs::read_to_string(p)
                .with_context(|| format!("failed to read template {}", p.display()))?,
        ),
        None => None,
    };

    let writer = SiteWriter {
        bundle,
        output_dir,
        config,
        templates: SiteTemplates::new(custom_template.as_deref())?,
        tag_slugs: unique_slugs(
            bundle.tag_index().iter().map(|b| b.name()),
            &RESERVED_TAG_SLUGS,
        ),
        generated: Local::now().format("%Y-%m-%d %H:%M").to_string(),
    };

    writer.write_assets()?;
    writer.write_search_index()?;
    writer.write_index_page()?;
    writer.write_search_page()?;
    let tag_pages = writer.write_tag_pages()?;
    let broken_links = writer.write_note_pages()?;

    let result = SiteResult {
        notes_written: bundle.notes().len(),
        tag_pages,
        broken_links,
    };
    info!(
        output = %output_dir.display(),
        notes = result.notes_written,
        tags = result.tag_pages,
        "generated site"
    );
    Ok(result)
}

impl SiteWriter<'_> {
    fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.output_dir.join(relative);
        write_file_atomic(&path, contents.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Prefix leading from a page back to the site root.
    fn root(&self, page_path: &str) -> Value {
        trusted_url(&root_prefix(page_path))
    }

    fn note_link(&self, from: &str, note: &Note) -> NoteLink {
        NoteLink {
            title: note.title().to_string(),
            url: trusted_url(&relative_url(from, &note.path().output_path())),
        }
    }

    fn tag_link(&self, from: &str, tag: &Tag) -> Option<TagLink> {
        let bucket = self.bundle.tag_index().get(tag.key())?;
        let slug = self.tag_slugs.get(bucket.name())?;
        Some(TagLink {
            name: tag.name().to_string(),
            url: trusted_url(&relative_url(from, &format!("tags/{}.html", slug))),
            count: bucket.len(),
        })
    }

    fn summary(&self, from: &str, note: &Note) -> NoteSummary {
        NoteSummary {
            title: note.title().to_string(),
            url: trusted_url(&relative_url(from, &note.path().output_path())),
            excerpt: note.excerpt().to_string(),
            modified: note.modified().map(format_date),
            tags: note.tags().iter().filter_map(|t| self.tag_link(from, t)).collect(),
        }
    }

    fn write_assets(&self) -> Result<()> {
        let css = get_theme_css(self.config.theme)?;
        self.write("assets/style.css", &css)?;
        self.write("assets/search.js", SEARCH_JS)?;
        debug!("wrote assets");
        Ok(())
    }

    fn write_search_index(&self) -> Result<()> {
        let mut records: Vec<_> = self.bundle.search_records().iter().collect();
        records.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.path.cmp(&b.path))
        });

        let entries: Vec<SearchEntry> = records
            .into_iter()
            .map(|r| SearchEntry {
                title: &r.title,
                url: join_base_url(self.config.base_url, &r.path.output_path()),
                tags: r.tags.iter().map(String::as_str).collect(),
                excerpt: &r.excerpt,
                content: &r.search_text,
            })
            .collect();

        let json = serde_json::to_string_pretty(&entries)?;
        self.write("search-index.json", &json)?;
        debug!(records = entries.len(), "wrote search index");
        Ok(())
    }

    fn write_index_page(&self) -> Result<()> {
        let page = "index.html";
        let mut notes: Vec<&Note> = self.bundle.notes().iter().collect();
        notes.sort_by(|a, b| {
            a.title()
                .to_lowercase()
                .cmp(&b.title().to_lowercase())
                .then_with(|| a.path().cmp(b.path()))
        });
        let summaries: Vec<NoteSummary> = notes.iter().map(|n| self.summary(page, n)).collect();

        let html = self.templates.render(
            Page::Index,
            context! {
                site_title => self.config.site_title,
                root => self.root(page),
                generated => &self.generated,
                notes => summaries,
            },
        )?;
        self.write(page, &html)
    }

    fn write_search_page(&self) -> Result<()> {
        let page = "search.html";
        let html = self.templates.render(
            Page::Search,
            context! {
                site_title => self.config.site_title,
                root => self.root(page),
                generated => &self.generated,
            },
        )?;
        self.write(page, &html)
    }

    fn write_tag_pages(&self) -> Result<usize> {
        let index_page = "tags/index.html";
        let mut tags = Vec::new();
        let mut written = 0;

        for bucket in self.bundle.tag_index().iter() {
            let Some(slug) = self.tag_slugs.get(bucket.name()) else {
                continue;
            };
            let file = format!("{}.html", slug);
            let page = format!("tags/{}", file);
            // The list sits next to the tag pages.
            tags.push(TagLink {
                name: bucket.name().to_string(),
                url: trusted_url(&file),
                count: bucket.len(),
            });

            let notes: Vec<NoteSummary> = bucket
                .notes()
                .iter()
                .filter_map(|p| self.bundle.note(p.as_str()))
                .map(|n| self.summary(&page, n))
                .collect();
            let html = self.templates.render(
                Page::Tag,
                context! {
                    site_title => self.config.site_title,
                    root => self.root(&page),
                    generated => &self.generated,
                    tag => bucket.name(),
                    notes => notes,
                },
            )?;
            self.write(&page, &html)?;
            written += 1;
        }

        let html = self.templates.render(
            Page::Tags,
            context! {
                site_title => self.config.site_title,
                root => self.root(index_page),
                generated => &self.generated,
                tags => tags,
            },
        )?;
        self.write(index_page, &html)?;
        debug!(tags = written, "wrote tag pages");
        Ok(written)
    }

    /// Writes note pages last, so a note named like a generated page wins.
    fn write_note_pages(&self) -> Result<usize> {
        let options = LinkResolverOptions {
            broken_link_handling: self.config.broken_links,
        };
        let resolver = LinkResolver::new(self.bundle.link_graph(), &options);

        let broken: Vec<usize> = self
            .bundle
            .notes()
            .par_iter()
            .map(|note| self.write_note_page(note, &resolver))
            .collect::<Result<_>>()?;

        debug!(notes = broken.len(), "wrote note pages");
        Ok(broken.iter().sum())
    }

    fn write_note_page(&self, note: &Note, resolver: &LinkResolver) -> Result<usize> {
        let page = note.path().output_path();
        if GENERATED_PAGES.contains(&page.as_str()) || is_tag_page(&page) {
            warn!(note = %note.path(), page = %page, "note page replaces a generated page");
        }

        let resolution = resolver.resolve(note.path(), note.rendered_body());
        let tags: Vec<TagLink> = note
            .tags()
            .iter()
            .filter_map(|t| self.tag_link(&page, t))
            .collect();
        let backlinks: Vec<NoteLink> = self
            .bundle
            .backlink_notes(note.path())
            .map(|n| self.note_link(&page, n))
            .collect();

        let html = self
            .templates
            .render(
                Page::Note,
                context! {
                    site_title => self.config.site_title,
                    root => self.root(&page),
                    generated => &self.generated,
                    title => note.title(),
                    path => note.path(),
                    content => trusted_html(resolution.content),
                    tags => tags,
                    backlinks => backlinks,
                    modified => note.modified().map(format_date),
                    modified_iso => note.modified().map(|m| m.to_rfc3339()),
                },
            )
            .with_context(|| format!("failed to render {}", note.path()))?;
        self.write(&page, &html)?;
        Ok(resolution.broken)
    }
}

fn is_tag_page(page: &str) -> bool {
    page.starts_with("tags/") && !page[5..].contains('/')
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
