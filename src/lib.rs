//! # toolhub
//!
//! A static site generator for software comparison pages and buyer's guides.
//!
//! Each page is one TOML file. Comparison pages declare contenders and
//! scored criteria; toolhub evaluates the scoreboard (per-criterion winners,
//! averages, overall winner), renders HTML with schema.org JSON-LD, and
//! writes a sitemap and page index.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  content/   │──▶│  Validate +  │──▶│   Render     │──▶ dist/
//! │  *.toml     │   │  Scoreboard  │   │ HTML+JSON-LD │
//! └─────────────┘   └──────────────┘   └──────┬───────┘
//!                                             │
//!                                             ▼
//!                                       ┌──────────┐
//!                                       │  serve   │
//!                                       │ (preview)│
//!                                       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! toolhub check                       # validate every page
//! toolhub scoreboard zoom-vs-teams    # inspect one comparison
//! toolhub build                       # write dist/
//! toolhub serve                       # preview on 127.0.0.1:4173
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML site configuration |
//! | [`models`] | Page, contender, criterion and content block types |
//! | [`error`] | Content validation errors |
//! | [`scoreboard`] | Averages, per-criterion winners, overall winner |
//! | [`brand`] | Brand-key normalization and styles |
//! | [`seo`] | Canonical URLs, page metadata, JSON-LD |
//! | [`content`] | Loading and validating page files |
//! | [`render`] | HTML rendering |
//! | [`site`] | Whole-site rendering, sitemap, `build` |
//! | [`report`] | Terminal reports for `check`, `scoreboard`, `brand` |
//! | [`server`] | Preview HTTP server |

pub mod brand;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod render;
pub mod report;
pub mod scoreboard;
pub mod seo;
pub mod server;
pub mod site;
