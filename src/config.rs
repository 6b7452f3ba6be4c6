use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub brands: Vec<BrandConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub name: String,
    /// Absolute origin used for canonical URLs, e.g. `https://example.com`.
    pub origin: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_author")]
    pub default_author: String,
}

fn default_author() -> String {
    "Editorial Team".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    #[serde(default = "default_content_root")]
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
        }
    }
}

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}
fn default_include_globs() -> Vec<String> {
    vec!["**/*.toml".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:4173".to_string()
}

/// A site-specific brand, checked before the built-in fragment table.
#[derive(Debug, Deserialize, Clone)]
pub struct BrandConfig {
    pub fragment: String,
    pub key: String,
    #[serde(default)]
    pub gradient: Option<[String; 2]>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Config {
    /// Config for tests and ad-hoc commands that never touch the filesystem.
    pub fn minimal(origin: &str) -> Self {
        Self {
            site: SiteConfig {
                name: "Tools Hub".to_string(),
                origin: origin.to_string(),
                description: None,
                default_author: default_author(),
            },
            content: ContentConfig::default(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
            brands: Vec::new(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Relative paths are relative to the config file, not the working directory.
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    if config.content.root.is_relative() {
        config.content.root = base.join(&config.content.root);
    }
    if config.output.dir.is_relative() {
        config.output.dir = base.join(&config.output.dir);
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let origin = &config.site.origin;
    let host = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
        .ok_or_else(|| {
            anyhow::anyhow!("site.origin must start with http:// or https://, got '{}'", origin)
        })?;
    if host.trim_matches('/').is_empty() {
        anyhow::bail!("site.origin has no host: '{}'", origin);
    }

    if config.site.name.trim().is_empty() {
        anyhow::bail!("site.name must not be empty");
    }

    if config.content.include_globs.is_empty() {
        anyhow::bail!("content.include_globs must list at least one pattern");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    for brand in &config.brands {
        if brand.fragment.trim().is_empty() || brand.key.trim().is_empty() {
            anyhow::bail!("brands entries need a non-empty fragment and key");
        }
    }

    Ok(())
}
