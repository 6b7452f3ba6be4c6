//! Whole-site rendering and the `toolhub build` command.
//!
//! Produces, under `[output].dir`:
//!
//! | File | Contents |
//! |------|----------|
//! | `index.html` | the Tools Hub listing every page |
//! | `<slug>/index.html` | one file per page |
//! | `sitemap.xml` | every canonical URL with its last-modified date |
//! | `pages.json` | page index for client-side search |
//!
//! Pages render independently of each other. The same [`RenderedSite`] is
//! served from memory by `toolhub serve`.

use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::content::{self, ValidPage};
use crate::render::SiteRenderer;
use crate::seo::canonical_url;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Every output file, keyed by site path (`/`, `/<slug>/`).
#[derive(Debug, Clone)]
pub struct RenderedSite {
    pub pages: BTreeMap<String, String>,
    pub sitemap: String,
    pub index_json: String,
    pub comparison_count: usize,
}

impl RenderedSite {
    /// Look up a rendered page by request path. `/slug`, `/slug/` and
    /// `/slug/index.html` all resolve to the same page.
    pub fn page(&self, request_path: &str) -> Option<&str> {
        let trimmed = request_path
            .trim_end_matches("index.html")
            .trim_matches('/');
        let key = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        self.pages.get(&key).map(String::as_str)
    }

    /// Number of pages, excluding the hub.
    pub fn page_count(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }
}

#[derive(Serialize)]
struct PageIndex {
    site: String,
    pages: Vec<PageIndexEntry>,
}

#[derive(Serialize)]
struct PageIndexEntry {
    slug: String,
    path: String,
    canonical: String,
    title: String,
    description: String,
    kind: &'static str,
    updated: Option<String>,
    winner: Option<String>,
}

/// Summary printed after a build.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub pages: usize,
    pub comparisons: usize,
    pub output: PathBuf,
}

/// Render every page, the hub, the sitemap and the page index.
pub fn render_site(config: &Config, pages: &[ValidPage]) -> Result<RenderedSite> {
    let renderer = SiteRenderer::new(config);

    let mut rendered = BTreeMap::new();
    rendered.insert("/".to_string(), renderer.render_hub(pages));
    for valid in pages {
        let html = renderer.render_page(valid);
        tracing::debug!(slug = %valid.page.slug, bytes = html.len(), "rendered page");
        rendered.insert(valid.page.path(), html);
    }

    let comparison_count = pages.iter().filter(|p| p.scoreboard.is_some()).count();

    Ok(RenderedSite {
        pages: rendered,
        sitemap: sitemap_xml(config, pages)?,
        index_json: page_index_json(config, pages)?,
        comparison_count,
    })
}

/// Load, validate, render and write the site to `[output].dir`.
pub fn build_site(config: &Config) -> Result<BuildSummary> {
    let pages = content::load_site(config)?;
    tracing::info!(pages = pages.len(), root = %config.content.root.display(), "content loaded");

    let site = render_site(config, &pages)?;
    let out = &config.output.dir;

    for (path, html) in &site.pages {
        let file = page_file(out, path);
        write_file(&file, html)?;
    }
    write_file(&out.join("sitemap.xml"), &site.sitemap)?;
    write_file(&out.join("pages.json"), &site.index_json)?;

    tracing::info!(output = %out.display(), "site written");

    Ok(BuildSummary {
        pages: site.page_count(),
        comparisons: site.comparison_count,
        output: out.clone(),
    })
}

fn page_file(out: &Path, site_path: &str) -> PathBuf {
    let relative = site_path.trim_matches('/');
    if relative.is_empty() {
        out.join("index.html")
    } else {
        out.join(relative).join("index.html")
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// `sitemap.xml` listing the hub and every page.
pub fn sitemap_xml(config: &Config, pages: &[ValidPage]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    let latest = pages.iter().filter_map(|p| p.page.last_modified()).max();
    write_url(
        &mut writer,
        &canonical_url(&config.site.origin, "/"),
        latest.map(|d| d.to_string()),
    )?;

    for valid in pages {
        write_url(
            &mut writer,
            &canonical_url(&config.site.origin, &valid.page.path()),
            valid.page.last_modified().map(|d| d.to_string()),
        )?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_url(writer: &mut Writer<Vec<u8>>, loc: &str, lastmod: Option<String>) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("url")))?;
    write_text_element(writer, "loc", loc)?;
    if let Some(date) = lastmod {
        write_text_element(writer, "lastmod", &date)?;
    }
    writer.write_event(Event::End(BytesEnd::new("url")))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// `pages.json`: one entry per page, in slug order.
pub fn page_index_json(config: &Config, pages: &[ValidPage]) -> Result<String> {
    let entries = pages
        .iter()
        .map(|valid| {
            let page = &valid.page;
            PageIndexEntry {
                slug: page.slug.clone(),
                path: page.path(),
                canonical: canonical_url(&config.site.origin, &page.path()),
                title: page.title.clone(),
                description: page.description.clone(),
                kind: page.kind(),
                updated: page.last_modified().map(|d| d.to_string()),
                winner: valid.scoreboard.as_ref().map(|b| b.overall_winner.clone()),
            }
        })
        .collect();

    let index = PageIndex {
        site: config.site.name.clone(),
        pages: entries,
    };
    Ok(serde_json::to_string_pretty(&index)?)
}
