//! portfolio-rs: a portfolio site generator
//!
//! Loads a blog and a work showcase from MDX documents, renders them into
//! static HTML, and ships the WordPress project estimator used on the site.

pub mod commands;
pub mod config;
pub mod content;
pub mod estimator;
pub mod generator;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The portfolio site rooted at a directory
#[derive(Clone)]
pub struct Portfolio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Blog post documents
    pub posts_dir: PathBuf,
    /// Work item documents
    pub works_dir: PathBuf,
    /// Assets copied verbatim into the output
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Portfolio {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let posts_dir = content_dir.join(&config.posts_dir);
        let works_dir = content_dir.join(&config.works_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            works_dir,
            static_dir,
            public_dir,
        }
    }

    /// Content loader over this site's documents
    pub fn loader(&self) -> content::ContentLoader<'_> {
        content::ContentLoader::new(self)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post or work document
    pub async fn new_document(&self, title: &str, layout: &str) -> Result<PathBuf> {
        commands::new::create_document(self, title, layout).await
    }
}
