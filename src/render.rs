//! HTML rendering with Maud.
//!
//! Every page shares one layout shell that writes
//! the head metadata, canonical link and JSON-LD blocks. Page bodies are built
//! from one handler per [`ContentBlock`] variant; comparison pages add the
//! contender cards, score table and pricing table on top.
//!
//! All interpolated text is escaped by Maud. The only pre-escaped output is
//! the stylesheet and JSON-LD passed through [`seo::script_body`].
//!
//! Links that open a new browsing context always carry
//! `rel="noopener noreferrer"`; see [`link`].

use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde_json::Value;

use crate::brand::{self, BrandCatalog};
use crate::config::Config;
use crate::content::ValidPage;
use crate::models::{CalloutTone, Comparison, ContentBlock, Page, PricingRow};
use crate::scoreboard::{Scoreboard, Winner};
use crate::seo::{self, PageMeta};

const STYLESHEET: &str = "\
body{font-family:system-ui,sans-serif;max-width:960px;margin:0 auto;padding:24px;line-height:1.6;color:#1f2937}\
header a,footer a{color:#2563eb;text-decoration:none}\
h1{margin-bottom:4px}\
.meta{color:#6b7280;font-size:.9em}\
.contenders{display:grid;grid-template-columns:repeat(auto-fit,minmax(220px,1fr));gap:16px;margin:24px 0}\
.contender{color:#fff;border-radius:12px;padding:16px}\
.contender img{width:40px;height:40px;border-radius:8px;background:#fff}\
.contender a{color:#fff}\
.badge{display:inline-block;font-size:.75em;padding:2px 8px;border-radius:999px;background:rgba(255,255,255,.2)}\
table{width:100%;border-collapse:collapse;margin:16px 0}\
th{background:#1f2937;color:#fff;text-align:left;padding:10px}\
td{padding:10px;border-bottom:1px solid #e5e7eb}\
td.winner,td.tie{font-weight:600}\
tfoot td{font-weight:700;background:#f9fafb}\
.winner-banner{background:#ecfdf5;border-left:4px solid #10b981;padding:16px;margin:16px 0;border-radius:4px}\
.callout{padding:16px;margin:16px 0;border-radius:4px;border-left:4px solid}\
.callout-info{background:#eff6ff;border-color:#3b82f6}\
.callout-tip{background:#ecfdf5;border-color:#10b981}\
.callout-warning{background:#fffbeb;border-color:#f59e0b}\
.pros-cons{display:grid;grid-template-columns:1fr 1fr;gap:16px}\
.pros li::marker{content:'+ '}\
.cons li::marker{content:'- '}\
details{border-bottom:1px solid #e5e7eb;padding:12px 0}\
summary{cursor:pointer;font-weight:600}\
.hub li{margin:12px 0}";

/// Render an anchor. `new_tab` links get `target="_blank"` together with
/// `rel="noopener noreferrer"`.
pub fn link(href: &str, label: &str, new_tab: bool) -> Markup {
    if new_tab {
        html! { a href=(href) target="_blank" rel="noopener noreferrer" { (label) } }
    } else {
        html! { a href=(href) { (label) } }
    }
}

/// Renders pages and the hub for one site configuration.
pub struct SiteRenderer<'a> {
    config: &'a Config,
    brands: BrandCatalog,
}

impl<'a> SiteRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            brands: BrandCatalog::with_configured(&config.brands),
        }
    }

    pub fn render_page(&self, valid: &ValidPage) -> String {
        let page = &valid.page;
        let meta = PageMeta::for_page(page, self.config);

        let mut json_ld = vec![seo::article(page, self.config)];
        if !page.faqs.is_empty() {
            json_ld.push(seo::faq_page(&page.faqs));
        }

        let body = match (page.comparison(), &valid.scoreboard) {
            (Some(comparison), Some(board)) => {
                json_ld.extend(self.product_reviews(page, comparison, board));
                self.comparison_body(page, comparison, board)
            }
            _ => self.article_body(page),
        };

        self.layout(&meta, &json_ld, body).into_string()
    }

    /// The "Tools Hub" index: every page, most recently modified first.
    pub fn render_hub(&self, pages: &[ValidPage]) -> String {
        let meta = PageMeta::for_hub(self.config);
        let mut listed: Vec<&ValidPage> = pages.iter().collect();
        listed.sort_by(|a, b| {
            b.page
                .last_modified()
                .cmp(&a.page.last_modified())
                .then_with(|| a.page.slug.cmp(&b.page.slug))
        });

        let body = html! {
            h1 { (self.config.site.name) }
            @if let Some(description) = &self.config.site.description {
                p.meta { (description) }
            }
            ul.hub {
                @for valid in &listed {
                    li {
                        (link(&valid.page.path(), &valid.page.title, false))
                        " "
                        span.badge { (valid.page.kind()) }
                        p.meta { (valid.page.description) }
                        @if let (Some(cmp), Some(board)) = (valid.page.comparison(), &valid.scoreboard) {
                            p.meta {
                                "Our pick: "
                                (display_name(cmp, &board.overall_winner))
                            }
                        }
                    }
                }
            }
        };

        self.layout(&meta, &[], body).into_string()
    }

    fn layout(&self, meta: &PageMeta, json_ld: &[Value], body: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (meta.title) }
                    meta name="description" content=(meta.description);
                    link rel="canonical" href=(meta.canonical);
                    meta property="og:title" content=(meta.title);
                    meta property="og:description" content=(meta.description);
                    meta property="og:type" content=(meta.og_type);
                    meta property="og:url" content=(meta.canonical);
                    meta property="og:site_name" content=(meta.site_name);
                    style { (PreEscaped(STYLESHEET)) }
                    @for value in json_ld {
                        script type="application/ld+json" { (PreEscaped(seo::script_body(value))) }
                    }
                }
                body {
                    header { (link("/", &self.config.site.name, false)) }
                    main { (body) }
                    footer { p { (link("/", "← Back to Tools Hub", false)) } }
                }
            }
        }
    }

    fn article_body(&self, page: &Page) -> Markup {
        html! {
            article {
                (self.page_header(page))
                @for block in page.blocks() {
                    (render_block(block, None))
                }
                (faq_section(page))
            }
        }
    }

    fn comparison_body(&self, page: &Page, comparison: &Comparison, board: &Scoreboard) -> Markup {
        let winner_avg = board.average_of(&board.overall_winner).unwrap_or_default();
        html! {
            article {
                (self.page_header(page))
                section.contenders {
                    @for contender in &comparison.contenders {
                        @let style = self.brands.style_for(&contender.name);
                        div.contender style=(format!("background:{}", style.css_gradient())) {
                            @if let Some(logo) = brand::logo_url(&style, &contender.url) {
                                img src=(logo) alt=(format!("{} logo", contender.name)) loading="lazy";
                            }
                            h3 { (contender.name) " " span class=(format!("badge {}", style.badge)) { (contender.key) } }
                            p { (contender.description) }
                            p { (link(&contender.url, &format!("Visit {}", contender.name), true)) }
                        }
                    }
                }
                div.winner-banner {
                    strong { "Overall winner: " }
                    (display_name(comparison, &board.overall_winner))
                    (format!(" ({:.1}/10)", crate::scoreboard::round_display(winner_avg)))
                }
                (score_table(comparison, board))
                @if !comparison.pricing.is_empty() {
                    (pricing_table(comparison, &comparison.pricing))
                }
                @for block in &comparison.blocks {
                    (render_block(block, Some(comparison)))
                }
                @if let Some(verdict) = &comparison.verdict {
                    section.verdict {
                        h2 { "Verdict" }
                        p { (verdict) }
                    }
                }
                (faq_section(page))
            }
        }
    }

    fn page_header(&self, page: &Page) -> Markup {
        let author = seo::page_author(page, self.config);
        html! {
            h1 { (page.title) }
            p.meta {
                "By " (author)
                @if let Some(date) = page.last_modified() {
                    " · Updated " time datetime=(date.to_string()) { (date.format("%B %-d, %Y").to_string()) }
                }
            }
            p.lede { (page.description) }
        }
    }

    fn product_reviews(&self, page: &Page, comparison: &Comparison, board: &Scoreboard) -> Vec<Value> {
        let author = seo::page_author(page, self.config);
        board
            .averages
            .iter()
            .filter_map(|avg| {
                comparison
                    .contender(&avg.key)
                    .map(|c| seo::product_review(c, avg.average, author))
            })
            .collect()
    }
}

fn display_name<'c>(comparison: &'c Comparison, key: &'c str) -> &'c str {
    comparison
        .contender(key)
        .map(|c| c.name.as_str())
        .unwrap_or(key)
}

fn score_table(comparison: &Comparison, board: &Scoreboard) -> Markup {
    html! {
        section.scores {
            h2 { "How they compare" }
            table {
                thead {
                    tr {
                        th { "Criterion" }
                        @for contender in &comparison.contenders { th { (contender.name) } }
                        th { "Winner" }
                    }
                }
                tbody {
                    @for (criterion, result) in comparison.criteria.iter().zip(&board.criteria) {
                        tr {
                            td { (criterion.label) }
                            @for contender in &comparison.contenders {
                                @let score = criterion.scores.get(&contender.key).copied().unwrap_or_default();
                                td { (format!("{:.1}", score)) }
                            }
                            @match &result.winner {
                                Winner::Tie => td.tie { "Tie" },
                                Winner::Contender(key) => td.winner { (display_name(comparison, key)) },
                            }
                        }
                    }
                }
                tfoot {
                    tr {
                        td { "Average" }
                        @for avg in &board.averages {
                            td { (format!("{:.1}", avg.display)) }
                        }
                        td { (display_name(comparison, &board.overall_winner)) }
                    }
                }
            }
        }
    }
}

fn pricing_table(comparison: &Comparison, rows: &[PricingRow]) -> Markup {
    html! {
        section.pricing {
            h2 { "Pricing" }
            table {
                thead {
                    tr { th { "Tool" } th { "Plan" } th { "Billing" } th { "Limits" } th { "Notes" } }
                }
                tbody {
                    @for row in rows {
                        tr {
                            td { (display_name(comparison, &row.contender)) }
                            td { (row.plan) }
                            td { (row.billing) }
                            td { (row.limits) }
                            td { (row.notes) }
                        }
                    }
                }
            }
        }
    }
}

fn faq_section(page: &Page) -> Markup {
    html! {
        @if !page.faqs.is_empty() {
            section.faq {
                h2 { "Frequently asked questions" }
                @for faq in &page.faqs {
                    details {
                        summary { (faq.question) }
                        p { (faq.answer) }
                    }
                }
            }
        }
    }
}

fn optional_heading(heading: &Option<String>) -> Markup {
    html! {
        @if let Some(h) = heading { h2 { (h) } }
    }
}

/// Render one content block. `comparison` resolves contender names for
/// pros/cons blocks.
pub fn render_block(block: &ContentBlock, comparison: Option<&Comparison>) -> Markup {
    match block {
        ContentBlock::Heading { text, level } => match *level {
            3 => html! { h3 { (text) } },
            4..=6 => html! { h4 { (text) } },
            _ => html! { h2 { (text) } },
        },
        ContentBlock::Paragraphs {
            heading,
            paragraphs,
        } => html! {
            (optional_heading(heading))
            @for paragraph in paragraphs { p { (paragraph) } }
        },
        ContentBlock::PlayList { heading, plays } => html! {
            (optional_heading(heading))
            ol.plays {
                @for play in plays {
                    li {
                        strong { (play.title) }
                        p { (play.body) }
                    }
                }
            }
        },
        ContentBlock::Table {
            heading,
            headers,
            rows,
        } => html! {
            (optional_heading(heading))
            table {
                thead { tr { @for h in headers { th { (h) } } } }
                tbody {
                    @for row in rows {
                        tr { @for cell in row { td { (cell) } } }
                    }
                }
            }
        },
        ContentBlock::Checklist { heading, items } => html! {
            (optional_heading(heading))
            ul.checklist {
                @for item in items { li { "✓ " (item) } }
            }
        },
        ContentBlock::ProsCons {
            contender,
            pros,
            cons,
        } => {
            let name = comparison
                .map(|c| display_name(c, contender))
                .unwrap_or(contender.as_str());
            html! {
                section.pros-cons-block {
                    h3 { (name) ": pros and cons" }
                    div.pros-cons {
                        ul.pros { @for pro in pros { li { (pro) } } }
                        ul.cons { @for con in cons { li { (con) } } }
                    }
                }
            }
        }
        ContentBlock::Callout { tone, text } => {
            let class = match tone {
                CalloutTone::Info => "callout callout-info",
                CalloutTone::Tip => "callout callout-tip",
                CalloutTone::Warning => "callout callout-warning",
            };
            html! { div class=(class) { p { (text) } } }
        }
        ContentBlock::Link {
            label,
            href,
            new_tab,
        } => html! { p { (link(href, label, *new_tab)) } },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::validate_page;

    const PAGE: &str = r#"
kind = "comparison"
slug = "zoom-vs-webinarjam"
title = "Zoom vs WebinarJam"
description = "Which <webinar> tool?"
published = "2024-04-02"

[[contenders]]
key = "zoom"
name = "Zoom"
description = "Video meetings."
url = "https://zoom.us"

[[contenders]]
key = "webinarjam"
name = "WebinarJam"
description = "Live webinars."
url = "https://www.webinarjam.com"

[[contenders]]
key = "newcomer"
name = "Totally New Tool"
description = "Fresh."
url = "https://newtool.dev"

[[criteria]]
label = "Ease of use"
scores = { zoom = 9.0, webinarjam = 9.0, newcomer = 8.0 }

[[criteria]]
label = "Automation"
scores = { zoom = 6.0, webinarjam = 9.4, newcomer = 0 }

[[pricing]]
contender = "zoom"
plan = "Pro"
billing = "Monthly"

[[faqs]]
question = "Can I run paid webinars?"
answer = "WebinarJam supports it."

[[blocks]]
type = "pros_cons"
contender = "zoom"
pros = ["Familiar"]
cons = ["Limited automation"]

[[blocks]]
type = "link"
label = "Zoom docs"
href = "https://support.zoom.us"
new_tab = true
"#;

    fn rendered() -> String {
        let page: Page = toml::from_str(PAGE).unwrap();
        let scoreboard = validate_page(&page).unwrap();
        let valid = ValidPage {
            source: "zoom-vs-webinarjam.toml".into(),
            page,
            scoreboard,
        };
        let config = Config::minimal("https://tools.example.com");
        SiteRenderer::new(&config).render_page(&valid)
    }

    #[test]
    fn test_new_tab_links_are_noopener() {
        let html = link("https://zoom.us", "Zoom", true).into_string();
        assert_eq!(
            html,
            r#"<a href="https://zoom.us" target="_blank" rel="noopener noreferrer">Zoom</a>"#
        );
        let html = link("/", "Home", false).into_string();
        assert_eq!(html, r#"<a href="/">Home</a>"#);
    }

    #[test]
    fn test_every_blank_target_has_rel() {
        let html = rendered();
        let blank = html.matches(r#"target="_blank""#).count();
        let rel = html.matches(r#"target="_blank" rel="noopener noreferrer""#).count();
        assert!(blank >= 4);
        assert_eq!(blank, rel);
    }

    #[test]
    fn test_comparison_page_content() {
        let html = rendered();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://tools.example.com/zoom-vs-webinarjam/">"#));
        assert!(html.contains(r#"<td class="tie">Tie</td>"#));
        assert!(html.contains(r#"<td class="winner">WebinarJam</td>"#));
        assert!(html.contains("Overall winner: </strong>WebinarJam (9.2/10)"));
        assert!(html.contains("Zoom: pros and cons"));
        assert!(html.contains("Back to Tools Hub"));
        // Unknown brand gets the neutral badge.
        assert!(html.contains("badge badge-neutral"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = rendered();
        assert!(html.contains("Which &lt;webinar&gt; tool?"));
        assert!(!html.contains("Which <webinar> tool?"));
    }

    #[test]
    fn test_json_ld_blocks() {
        let html = rendered();
        let scripts = html.matches(r#"<script type="application/ld+json">"#).count();
        // Article + FAQPage + one Product per contender
        assert_eq!(scripts, 5);
        assert!(html.contains(r#""@type":"FAQPage""#));
        assert!(html.contains(r#""ratingValue":"9.2""#));
    }

    #[test]
    fn test_review_and_article_share_author() {
        let html = rendered();
        let person = r#""author":{"@type":"Person","name":"Editorial Team"}"#;
        // Article + one Review per contender
        assert_eq!(html.matches(person).count(), 4);
    }

    #[test]
    fn test_render_blocks() {
        let block = ContentBlock::Heading {
            text: "Setup".into(),
            level: 3,
        };
        assert_eq!(render_block(&block, None).into_string(), "<h3>Setup</h3>");

        let block = ContentBlock::Checklist {
            heading: None,
            items: vec!["Invite".into()],
        };
        assert_eq!(
            render_block(&block, None).into_string(),
            r#"<ul class="checklist"><li>✓ Invite</li></ul>"#
        );

        let block = ContentBlock::Callout {
            tone: CalloutTone::Warning,
            text: "Careful".into(),
        };
        assert!(render_block(&block, None)
            .into_string()
            .contains(r#"class="callout callout-warning""#));
    }

    #[test]
    fn test_hub_lists_pages_newest_first() {
        let config = Config::minimal("https://tools.example.com");
        let mut older: Page = toml::from_str(PAGE).unwrap();
        older.slug = "older".into();
        older.title = "Older page".into();
        older.published = chrono::NaiveDate::from_ymd_opt(2023, 1, 1);
        let newer: Page = toml::from_str(PAGE).unwrap();
        let pages: Vec<ValidPage> = [older, newer]
            .into_iter()
            .map(|page| ValidPage {
                source: "x.toml".into(),
                scoreboard: validate_page(&page).unwrap(),
                page,
            })
            .collect();
        let html = SiteRenderer::new(&config).render_hub(&pages);
        let newer_at = html.find("/zoom-vs-webinarjam/").unwrap();
        let older_at = html.find("/older/").unwrap();
        assert!(newer_at < older_at);
        assert!(html.contains("Our pick: WebinarJam"));
    }
}
