//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub source_dir: String,
    pub posts_dir: String,
    pub public_dir: String,
    pub template_dir: String,

    // Templates
    pub post_template: String,
    pub index_template: String,

    // Home page
    pub index: IndexConfig,

    // Writing
    pub markdown: MarkdownConfig,

    // Server
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: "blog".to_string(),
            posts_dir: "posts".to_string(),
            public_dir: "dist".to_string(),
            template_dir: "templates".to_string(),

            post_template: "post.html".to_string(),
            index_template: "index.html".to_string(),

            index: IndexConfig::default(),
            markdown: MarkdownConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }
}

/// How posts are ordered on the index page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexOrder {
    /// Newest first; posts sharing a date keep traversal order
    #[serde(rename = "-date")]
    DateDesc,
    /// Exactly the order the content walk produced
    #[serde(rename = "walk")]
    Walk,
}

/// Index page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub title: String,
    pub order_by: IndexOrder,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            title: "Home".to_string(),
            order_by: IndexOrder::DateDesc,
        }
    }
}

/// Markdown conversion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GFM-style extensions (tables, strikethrough, task lists, footnotes)
    pub extensions: bool,
    /// Highlight fenced code blocks with syntect
    pub highlight: bool,
    pub line_number: bool,
    pub highlight_theme: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: false,
            highlight: false,
            line_number: false,
            highlight_theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Static server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 8080,
        }
    }
}
