//! Canonical URLs, page metadata and schema.org structured data.
//!
//! Structured data is emitted as JSON-LD and embedded by the renderer in
//! `<script type="application/ld+json">` tags. Three shapes are produced:
//!
//! | Builder | `@type` | Used on |
//! |---------|---------|---------|
//! | [`faq_page`] | `FAQPage` | any page with FAQs |
//! | [`product_review`] | `Product` (with `review`) | each contender on a comparison |
//! | [`article`] | `Article` | every page |

use serde_json::{json, Value};

use crate::config::Config;
use crate::models::{Contender, FaqEntry, Page};
use crate::scoreboard::{round_display, MAX_SCORE};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Join a site origin and a site-relative path into an absolute URL.
///
/// Exactly one slash separates origin and path, and runs of slashes inside
/// the path collapse to one. Paths that are already absolute `http(s)` URLs
/// are returned unchanged. Nothing is validated.
///
/// ```
/// use toolhub::seo::canonical_url;
///
/// assert_eq!(
///     canonical_url("https://example.com/", "//tools//zoom-vs-teams/"),
///     "https://example.com/tools/zoom-vs-teams/"
/// );
/// ```
pub fn canonical_url(origin: &str, path: &str) -> String {
    if path.starts_with("https://") || path.starts_with("http://") {
        return path.to_string();
    }

    let mut collapsed = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        collapsed.push(ch);
    }

    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        collapsed.trim_start_matches('/')
    )
}

/// Head metadata for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// `og:type`
    pub og_type: &'static str,
    pub site_name: String,
}

impl PageMeta {
    pub fn for_page(page: &Page, config: &Config) -> Self {
        Self {
            title: format!("{} | {}", page.title, config.site.name),
            description: page.description.clone(),
            canonical: canonical_url(&config.site.origin, &page.path()),
            og_type: "article",
            site_name: config.site.name.clone(),
        }
    }

    pub fn for_hub(config: &Config) -> Self {
        Self {
            title: config.site.name.clone(),
            description: config
                .site
                .description
                .clone()
                .unwrap_or_else(|| format!("Guides and tool comparisons from {}", config.site.name)),
            canonical: canonical_url(&config.site.origin, "/"),
            og_type: "website",
            site_name: config.site.name.clone(),
        }
    }
}

/// `FAQPage` with one `Question` per entry.
pub fn faq_page(faqs: &[FaqEntry]) -> Value {
    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                }
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": questions,
    })
}

/// `Product` carrying a single editorial `Review` rated on a 0-10 scale.
///
/// `ratingValue` is the one-decimal display average as a string.
pub fn product_review(contender: &Contender, average: f64, author: &str) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Product",
        "name": contender.name,
        "description": contender.description,
        "url": contender.url,
        "review": {
            "@type": "Review",
            "author": {
                "@type": "Person",
                "name": author,
            },
            "reviewRating": {
                "@type": "Rating",
                "ratingValue": format!("{:.1}", round_display(average)),
                "bestRating": format!("{}", MAX_SCORE),
                "worstRating": "0",
            }
        }
    })
}

/// The page's byline, or the site's default author.
pub fn page_author<'a>(page: &'a Page, config: &'a Config) -> &'a str {
    page.author
        .as_deref()
        .unwrap_or(&config.site.default_author)
}

/// `Article` for any page. Dates are omitted when the page has none.
pub fn article(page: &Page, config: &Config) -> Value {
    let author = page_author(page, config);

    let mut value = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Article",
        "headline": page.title,
        "description": page.description,
        "mainEntityOfPage": canonical_url(&config.site.origin, &page.path()),
        "author": {
            "@type": "Person",
            "name": author,
        },
        "publisher": {
            "@type": "Organization",
            "name": config.site.name,
        },
    });

    if let Some(published) = page.published {
        value["datePublished"] = json!(published.to_string());
    }
    if let Some(modified) = page.last_modified() {
        value["dateModified"] = json!(modified.to_string());
    }
    value
}

/// Serialize JSON-LD for inlining in a `<script>` element.
///
/// `<` is written as `\u003c` so page text can never open or close a tag
/// inside the script element. The JSON value is unchanged.
pub fn script_body(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}
