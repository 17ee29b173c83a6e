//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::estimator::BasePolicy;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub keywords: Vec<String>,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub posts_dir: String,
    pub works_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    /// File extensions enumerated as content documents
    pub extensions: Vec<String>,
    pub excerpt_length: usize,
    pub recent_count: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Tools
    #[serde(default)]
    pub estimator: EstimatorConfig,
    /// Extra cards on the projects page, after the estimator
    pub tools: Vec<ToolConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: String::new(),
            keywords: Vec::new(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            works_dir: "works".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            extensions: vec!["mdx".to_string()],
            excerpt_length: 120,
            recent_count: 3,
            highlight: HighlightConfig::default(),

            estimator: EstimatorConfig::default(),
            tools: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        // An empty file is valid and means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Whether a file extension marks a content document
    pub fn is_content_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.trim_start_matches('.') == ext)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Estimator tool configuration
///
/// Only the base-hours policy is selectable; hour catalogs are fixed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub policy: BasePolicy,
}

/// A project card linking to a tool hosted elsewhere
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Portfolio");
        assert_eq!(config.extensions, vec!["mdx"]);
        assert_eq!(config.excerpt_length, 120);
        assert_eq!(config.estimator.policy, BasePolicy::Weighted);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Jorge Araya
author: Jorge
extensions: [mdx, md]
highlight:
  line_number: true
estimator:
  policy: flat
tools:
  - title: Post Bulk Actions
    url: https://chromewebstore.google.com/
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Jorge Araya");
        assert_eq!(config.posts_dir, "posts");
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.estimator.policy, BasePolicy::Flat);
        assert_eq!(config.tools.len(), 1);
        assert_eq!(config.tools[0].title, "Post Bulk Actions");
        assert!(config.tools[0].image.is_none());
        assert!(config.is_content_extension("md"));
        assert!(!config.is_content_extension("txt"));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.public_dir, "public");
    }
}
