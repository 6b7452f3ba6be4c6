//! Loading and validating authored pages.
//!
//! Walks `[content].root`, keeps files matching the include globs (and not
//! the exclude globs), and parses each one as a [`Page`]. Validation runs the
//! scoreboard evaluator for every comparison so bad content fails the build
//! instead of reaching a rendered page.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::ContentError;
use crate::models::{ContentBlock, Page, PageBody};
use crate::scoreboard::{self, is_valid_key, Scoreboard};

/// A parsed page plus the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub source: PathBuf,
    pub page: Page,
}

/// A page that passed validation, with its scoreboard if it is a comparison.
#[derive(Debug, Clone)]
pub struct ValidPage {
    pub source: PathBuf,
    pub page: Page,
    pub scoreboard: Option<Scoreboard>,
}

pub fn scan_content(config: &Config) -> Result<Vec<LoadedPage>> {
    let root = &config.content.root;
    if !root.exists() {
        bail!("Content root does not exist: {}", root.display());
    }

    let include_set = build_globset(&config.content.include_globs)?;

    let mut default_excludes = vec!["**/.git/**".to_string(), "**/_drafts/**".to_string()];
    default_excludes.extend(config.content.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut pages = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude_set.is_match(&rel_str) {
            tracing::trace!(path = %rel_str, "excluded");
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        let page = parse_page_file(path)?;
        tracing::debug!(path = %rel_str, slug = %page.slug, kind = page.kind(), "loaded page");
        pages.push(LoadedPage {
            source: path.to_path_buf(),
            page,
        });
    }

    // Sort for deterministic ordering
    pages.sort_by(|a, b| a.page.slug.cmp(&b.page.slug));

    let mut seen = HashSet::new();
    for loaded in &pages {
        if !seen.insert(loaded.page.slug.as_str()) {
            bail!(
                "Duplicate slug '{}' (second definition in {})",
                loaded.page.slug,
                loaded.source.display()
            );
        }
    }

    Ok(pages)
}

pub fn parse_page_file(path: &Path) -> Result<Page> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse page: {}", path.display()))
}

/// Load and validate every page. Stops at the first invalid page.
pub fn load_site(config: &Config) -> Result<Vec<ValidPage>> {
    scan_content(config)?
        .into_iter()
        .map(|loaded| {
            let scoreboard = validate_page(&loaded.page).with_context(|| {
                format!(
                    "Invalid page '{}' ({})",
                    loaded.page.slug,
                    loaded.source.display()
                )
            })?;
            Ok(ValidPage {
                source: loaded.source,
                page: loaded.page,
                scoreboard,
            })
        })
        .collect()
}

/// Check one page and evaluate its scoreboard.
///
/// Articles return `Ok(None)`. Comparisons must have a valid scoreboard,
/// and every pros/cons block and pricing row must name a declared contender.
pub fn validate_page(page: &Page) -> Result<Option<Scoreboard>, ContentError> {
    validate_slug(&page.slug)?;

    let comparison = match &page.body {
        PageBody::Article { .. } => return Ok(None),
        PageBody::Comparison(c) => c,
    };

    let board = scoreboard::evaluate_comparison(comparison)?;

    for row in &comparison.pricing {
        if comparison.contender(&row.contender).is_none() {
            return Err(ContentError::DanglingReference {
                context: format!("pricing plan '{}'", row.plan),
                contender: row.contender.clone(),
            });
        }
    }

    for block in &comparison.blocks {
        if let ContentBlock::ProsCons { contender, .. } = block {
            if comparison.contender(contender).is_none() {
                return Err(ContentError::DanglingReference {
                    context: "pros/cons block".to_string(),
                    contender: contender.clone(),
                });
            }
        }
    }

    Ok(Some(board))
}

/// First path segments the preview server routes itself.
const RESERVED_SEGMENTS: &[&str] = &["health"];

/// Slugs are `/`-separated segments of lowercase keys, and may not start with
/// a reserved segment.
fn validate_slug(slug: &str) -> Result<(), ContentError> {
    if !slug.split('/').all(is_valid_key) {
        return Err(ContentError::InvalidKey(slug.to_string()));
    }
    let first = slug.split('/').next().unwrap_or_default();
    if RESERVED_SEGMENTS.contains(&first) {
        return Err(ContentError::ReservedSlug(slug.to_string()));
    }
    Ok(())
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
