//! Terminal reports for `toolhub check`, `toolhub scoreboard` and
//! `toolhub brand`.
//!
//! Reports go to stdout; logging goes to stderr.

use anyhow::{anyhow, Result};

use crate::brand::{self, BrandCatalog};
use crate::config::Config;
use crate::content;
use crate::models::Comparison;
use crate::scoreboard::Scoreboard;

/// Validate every page and print a one-line summary per comparison.
///
/// Fails on the first invalid page.
pub fn run_check(config: &Config) -> Result<()> {
    let pages = content::load_site(config)?;

    let mut comparisons = 0;
    let mut overall_ties = 0;

    println!("{:<40} {:<12} {:<20} AVERAGE", "PAGE", "KIND", "WINNER");
    for valid in &pages {
        match (valid.page.comparison(), &valid.scoreboard) {
            (Some(_), Some(board)) => {
                comparisons += 1;
                let avg = board
                    .averages
                    .iter()
                    .find(|a| a.key == board.overall_winner)
                    .map(|a| a.display)
                    .unwrap_or_default();
                println!(
                    "{:<40} {:<12} {:<20} {:.1}",
                    valid.page.slug,
                    "comparison",
                    board.overall_winner,
                    avg
                );
                if board.has_overall_tie() {
                    overall_ties += 1;
                    let leaders = board.tied_leaders().join(", ");
                    println!("  note: overall averages tied between {}", leaders);
                    tracing::warn!(slug = %valid.page.slug, leaders = %leaders, "overall tie resolved by page order");
                }
            }
            _ => println!("{:<40} {:<12} {:<20} -", valid.page.slug, "article", "-"),
        }
    }

    println!();
    println!(
        "ok: {} pages, {} comparisons, {} overall ties",
        pages.len(),
        comparisons,
        overall_ties
    );
    Ok(())
}

/// Print one page's scoreboard as a table, or as JSON with `json`.
pub fn run_scoreboard(config: &Config, slug: &str, json: bool) -> Result<()> {
    let slug = slug.trim_matches('/');
    let pages = content::load_site(config)?;
    let valid = pages
        .iter()
        .find(|p| p.page.slug == slug)
        .ok_or_else(|| anyhow!("page not found: {}", slug))?;

    let (comparison, board) = match (valid.page.comparison(), &valid.scoreboard) {
        (Some(c), Some(b)) => (c, b),
        _ => anyhow::bail!("'{}' is an article and has no scoreboard", slug),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(board)?);
    } else {
        print!("{}", format_scoreboard(comparison, board));
    }
    Ok(())
}

/// Fixed-width table: one row per criterion, then averages and the winner.
pub fn format_scoreboard(comparison: &Comparison, board: &Scoreboard) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<28}", "CRITERION"));
    for contender in &comparison.contenders {
        out.push_str(&format!(" {:>14}", truncate(&contender.key, 14)));
    }
    out.push_str("  WINNER\n");

    for (criterion, result) in comparison.criteria.iter().zip(&board.criteria) {
        out.push_str(&format!("{:<28}", truncate(&criterion.label, 28)));
        for contender in &comparison.contenders {
            let score = criterion
                .scores
                .get(&contender.key)
                .copied()
                .unwrap_or_default();
            out.push_str(&format!(" {:>14.1}", score));
        }
        out.push_str(&format!("  {}\n", result.winner));
    }

    out.push_str(&format!("{:<28}", "AVERAGE"));
    for avg in &board.averages {
        out.push_str(&format!(" {:>14.1}", avg.display));
    }
    out.push('\n');

    out.push_str(&format!("\noverall winner: {}\n", board.overall_winner));
    if board.has_overall_tie() {
        out.push_str(&format!(
            "note: averages tied between {}; first listed wins\n",
            board.tied_leaders().join(", ")
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}

/// Print the normalized key and resolved style for a brand name.
pub fn run_brand(config: &Config, name: &str) -> Result<()> {
    let catalog = BrandCatalog::with_configured(&config.brands);
    let key = catalog.normalize(name);
    let style = catalog.style_for(name);

    println!("name:      {}", name);
    println!("key:       {}", key);
    println!(
        "known:     {}",
        if catalog.is_known(name) { "yes" } else { "no (fallback style)" }
    );
    println!("gradient:  {} -> {}", style.gradient_from, style.gradient_to);
    println!("badge:     {}", style.badge);
    if let Some(logo) = brand::logo_url(&style, "") {
        println!("logo:      {}", logo);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contender, Criterion};
    use crate::scoreboard::evaluate_comparison;

    fn contender(key: &str) -> Contender {
        Contender {
            key: key.to_string(),
            name: key.to_uppercase(),
            description: String::new(),
            url: format!("https://{}.example", key),
        }
    }

    fn comparison() -> Comparison {
        Comparison {
            contenders: vec![contender("alpha"), contender("beta")],
            criteria: vec![
                Criterion {
                    label: "Speed".to_string(),
                    scores: [("alpha".to_string(), 9.0), ("beta".to_string(), 9.0)]
                        .into_iter()
                        .collect(),
                },
                Criterion {
                    label: "Price".to_string(),
                    scores: [("alpha".to_string(), 7.0), ("beta".to_string(), 8.0)]
                        .into_iter()
                        .collect(),
                },
            ],
            pricing: Vec::new(),
            verdict: None,
            blocks: Vec::new(),
        }
    }

    #[test]
    fn test_format_scoreboard() {
        let cmp = comparison();
        let board = evaluate_comparison(&cmp).unwrap();
        let text = format_scoreboard(&cmp, &board);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("CRITERION"));
        assert!(lines[1].starts_with("Speed") && lines[1].ends_with("Tie"));
        assert!(lines[2].starts_with("Price") && lines[2].ends_with("beta"));
        assert!(lines[3].starts_with("AVERAGE"));
        assert!(lines[3].contains("8.0") && lines[3].contains("8.5"));
        assert!(text.contains("overall winner: beta"));
        assert!(!text.contains("note:"));
    }

    #[test]
    fn test_format_flags_overall_tie() {
        let mut cmp = comparison();
        cmp.criteria[1].scores.insert("alpha".to_string(), 8.0);
        let board = evaluate_comparison(&cmp).unwrap();
        let text = format_scoreboard(&cmp, &board);
        assert!(text.contains("overall winner: alpha"));
        assert!(text.contains("note: averages tied between alpha, beta"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long label", 6), "a ver…");
    }
}
