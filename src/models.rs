//! Core content models used throughout toolhub.
//!
//! Each page is authored as one TOML file and deserialized into a [`Page`].
//! Pages are created once when the content directory is loaded and are never
//! mutated afterwards.
//!
//! Page bodies are a tagged union: an article is a list of [`ContentBlock`]s,
//! a comparison adds contenders, scored criteria and pricing on top.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single authored page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Site-relative slug, e.g. `zoom-vs-webinarjam` or `guides/best-crm`.
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub published: Option<NaiveDate>,
    #[serde(default)]
    pub updated: Option<NaiveDate>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub faqs: Vec<FaqEntry>,
    #[serde(flatten)]
    pub body: PageBody,
}

/// What kind of page this is, selected by the `kind` key in the TOML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageBody {
    Article {
        #[serde(default)]
        blocks: Vec<ContentBlock>,
    },
    Comparison(Comparison),
}

/// The scored part of a comparison page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Comparison {
    pub contenders: Vec<Contender>,
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub pricing: Vec<PricingRow>,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

/// One of the products compared on a page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Contender {
    /// Lowercase slug, unique within the page.
    pub key: String,
    pub name: String,
    pub description: String,
    pub url: String,
}

/// A named comparison dimension with one score per contender.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Criterion {
    pub label: String,
    pub scores: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Plan details for one contender. Purely descriptive.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PricingRow {
    pub contender: String,
    pub plan: String,
    #[serde(default)]
    pub billing: String,
    #[serde(default)]
    pub limits: String,
    #[serde(default)]
    pub notes: String,
}

/// A numbered step in a [`ContentBlock::PlayList`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Play {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutTone {
    #[default]
    Info,
    Tip,
    Warning,
}

/// Body content, selected by the `type` key of each `[[blocks]]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading {
        text: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    Paragraphs {
        #[serde(default)]
        heading: Option<String>,
        paragraphs: Vec<String>,
    },
    PlayList {
        #[serde(default)]
        heading: Option<String>,
        plays: Vec<Play>,
    },
    Table {
        #[serde(default)]
        heading: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Checklist {
        #[serde(default)]
        heading: Option<String>,
        items: Vec<String>,
    },
    ProsCons {
        contender: String,
        #[serde(default)]
        pros: Vec<String>,
        #[serde(default)]
        cons: Vec<String>,
    },
    Callout {
        #[serde(default)]
        tone: CalloutTone,
        text: String,
    },
    Link {
        label: String,
        href: String,
        #[serde(default)]
        new_tab: bool,
    },
}

fn default_heading_level() -> u8 {
    2
}

impl Page {
    /// `"article"` or `"comparison"`, matching the TOML `kind` key.
    pub fn kind(&self) -> &'static str {
        match self.body {
            PageBody::Article { .. } => "article",
            PageBody::Comparison(_) => "comparison",
        }
    }

    /// Site-relative path with leading and trailing slash.
    pub fn path(&self) -> String {
        format!("/{}/", self.slug.trim_matches('/'))
    }

    pub fn comparison(&self) -> Option<&Comparison> {
        match &self.body {
            PageBody::Comparison(c) => Some(c),
            PageBody::Article { .. } => None,
        }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        match &self.body {
            PageBody::Article { blocks } => blocks,
            PageBody::Comparison(c) => &c.blocks,
        }
    }

    /// The date shown to readers and used for sorting: `updated` if set,
    /// otherwise `published`.
    pub fn last_modified(&self) -> Option<NaiveDate> {
        self.updated.or(self.published)
    }
}

impl Comparison {
    pub fn contender(&self, key: &str) -> Option<&Contender> {
        self.contenders.iter().find(|c| c.key == key)
    }

    pub fn contender_keys(&self) -> Vec<&str> {
        self.contenders.iter().map(|c| c.key.as_str()).collect()
    }
}
