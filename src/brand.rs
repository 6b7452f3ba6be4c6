//! Brand-key normalization and presentation styles.
//!
//! Contender display names are free-form ("GoTo Meeting", "SE Ranking",
//! "Lemon Squeezy"). To pick a gradient and badge for a brand, the name is
//! reduced to a canonical lookup key by case-insensitive substring matching
//! against an ordered fragment table. The first fragment that matches wins,
//! so more specific fragments must come before generic ones.
//!
//! Names that match nothing fall back to their lowercased form. That key
//! usually misses the style map, and the renderer then uses
//! [`BrandStyle::fallback`]. Neither step can fail.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::BrandConfig;

/// Built-in `(fragment, key)` pairs, checked in order.
const BUILTIN_FRAGMENTS: &[(&str, &str)] = &[
    ("goto", "goto meeting"),
    ("microsoft", "microsoft teams"),
    ("google meet", "google meet"),
    ("zoom", "zoom"),
    ("webinarjam", "webinarjam"),
    ("everwebinar", "everwebinar"),
    ("livestorm", "livestorm"),
    ("monster", "monsterinsights"),
    ("se ranking", "se ranking"),
    ("semrush", "semrush"),
    ("ahrefs", "ahrefs"),
    ("lemon", "lemon squeezy"),
    ("gumroad", "gumroad"),
    ("paddle", "paddle"),
    ("stripe", "stripe"),
    ("hubspot", "hubspot"),
    ("salesforce", "salesforce"),
    ("notion", "notion"),
];

/// Built-in `(key, gradient from, gradient to, badge class)` styles.
const BUILTIN_STYLES: &[(&str, &str, &str, &str)] = &[
    ("goto meeting", "#f68d2e", "#f04e23", "badge-orange"),
    ("microsoft teams", "#5b5fc7", "#4b53bc", "badge-indigo"),
    ("google meet", "#00897b", "#34a853", "badge-green"),
    ("zoom", "#2d8cff", "#0b5cff", "badge-blue"),
    ("webinarjam", "#ff5a36", "#d7263d", "badge-red"),
    ("everwebinar", "#1e88e5", "#1565c0", "badge-blue"),
    ("livestorm", "#1a1a2e", "#3c3c6e", "badge-dark"),
    ("monsterinsights", "#4a3aff", "#7b61ff", "badge-purple"),
    ("se ranking", "#1e6cff", "#00c2ff", "badge-blue"),
    ("semrush", "#ff642d", "#ff8c42", "badge-orange"),
    ("ahrefs", "#054ada", "#ff8800", "badge-blue"),
    ("lemon squeezy", "#ffc233", "#7047eb", "badge-yellow"),
    ("gumroad", "#ff90e8", "#23a094", "badge-pink"),
    ("paddle", "#2d2d2d", "#5c5c5c", "badge-dark"),
    ("stripe", "#635bff", "#0a2540", "badge-indigo"),
    ("hubspot", "#ff7a59", "#ff5c35", "badge-orange"),
    ("salesforce", "#00a1e0", "#032d60", "badge-blue"),
    ("notion", "#000000", "#37352f", "badge-dark"),
];

/// Normalize a display name with the built-in fragment table.
///
/// ```
/// use toolhub::brand::normalize_brand_key;
///
/// assert_eq!(normalize_brand_key("GoTo Meeting"), "goto meeting");
/// assert_eq!(normalize_brand_key("Totally New Tool"), "totally new tool");
/// ```
pub fn normalize_brand_key(name: &str) -> String {
    normalize_with(BUILTIN_FRAGMENTS.iter().copied(), name)
}

fn normalize_with<'a>(
    fragments: impl IntoIterator<Item = (&'a str, &'a str)>,
    name: &str,
) -> String {
    let lowered = name.to_lowercase();
    fragments
        .into_iter()
        .find(|(fragment, _)| lowered.contains(fragment))
        .map(|(_, key)| key.to_string())
        .unwrap_or(lowered)
}

/// Presentation metadata for one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandStyle {
    pub gradient_from: String,
    pub gradient_to: String,
    pub badge: String,
    pub logo_url: Option<String>,
}

impl BrandStyle {
    /// Neutral style for brands the catalog does not know.
    pub fn fallback() -> Self {
        Self {
            gradient_from: "#64748b".to_string(),
            gradient_to: "#334155".to_string(),
            badge: "badge-neutral".to_string(),
            logo_url: None,
        }
    }

    /// CSS `background` value for contender cards.
    pub fn css_gradient(&self) -> String {
        format!(
            "linear-gradient(135deg, {}, {})",
            self.gradient_from, self.gradient_to
        )
    }
}

/// Fragment table plus styles, with site-configured brands layered on top.
#[derive(Debug, Clone)]
pub struct BrandCatalog {
    fragments: Vec<(String, String)>,
    styles: HashMap<String, BrandStyle>,
}

impl Default for BrandCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BrandCatalog {
    pub fn builtin() -> Self {
        let fragments = BUILTIN_FRAGMENTS
            .iter()
            .map(|(f, k)| (f.to_string(), k.to_string()))
            .collect();
        let styles = BUILTIN_STYLES
            .iter()
            .map(|(key, from, to, badge)| {
                (
                    key.to_string(),
                    BrandStyle {
                        gradient_from: from.to_string(),
                        gradient_to: to.to_string(),
                        badge: badge.to_string(),
                        logo_url: None,
                    },
                )
            })
            .collect();
        Self { fragments, styles }
    }

    /// Built-in catalog with `brands` checked first.
    ///
    /// A configured brand with the same key as a built-in one replaces its
    /// style.
    pub fn with_configured(brands: &[BrandConfig]) -> Self {
        let mut catalog = Self::builtin();
        let mut configured = Vec::with_capacity(brands.len());
        for brand in brands {
            let key = brand.key.to_lowercase();
            configured.push((brand.fragment.to_lowercase(), key.clone()));
            let fallback = BrandStyle::fallback();
            let style = BrandStyle {
                gradient_from: brand
                    .gradient
                    .as_ref()
                    .map(|g| g[0].clone())
                    .unwrap_or(fallback.gradient_from),
                gradient_to: brand
                    .gradient
                    .as_ref()
                    .map(|g| g[1].clone())
                    .unwrap_or(fallback.gradient_to),
                badge: brand.badge.clone().unwrap_or(fallback.badge),
                logo_url: brand.logo_url.clone(),
            };
            catalog.styles.insert(key, style);
        }
        configured.append(&mut catalog.fragments);
        catalog.fragments = configured;
        catalog
    }

    pub fn normalize(&self, name: &str) -> String {
        normalize_with(
            self.fragments.iter().map(|(f, k)| (f.as_str(), k.as_str())),
            name,
        )
    }

    /// Style for a display name. Unknown brands get [`BrandStyle::fallback`].
    pub fn style_for(&self, name: &str) -> BrandStyle {
        let key = self.normalize(name);
        match self.styles.get(&key) {
            Some(style) => style.clone(),
            None => {
                tracing::debug!(name, key = %key, "no brand style, using fallback");
                BrandStyle::fallback()
            }
        }
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.styles.contains_key(&self.normalize(name))
    }
}

/// Logo for a contender: the configured logo, else a logo service URL
/// derived from the contender's site.
pub fn logo_url(style: &BrandStyle, site_url: &str) -> Option<String> {
    if let Some(url) = &style.logo_url {
        return Some(url.clone());
    }
    let host = site_url
        .split("://")
        .nth(1)?
        .split(['/', '?', '#'])
        .next()?
        .trim_start_matches("www.");
    if host.is_empty() {
        return None;
    }
    Some(format!("https://logo.clearbit.com/{}", host))
}
