//! Content module - blog posts and work items loaded from MDX documents

pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod work;

use std::path::PathBuf;
use thiserror::Error;

pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostDetail};
pub use work::WorkItem;

/// Errors while reading content documents
///
/// None of these reach the caller of a listing or lookup: they are logged
/// and turned into an empty listing, a skipped document, or `None`.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path:?} does not start with a front-matter block")]
    MissingFrontMatter { path: PathBuf },

    #[error("invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid identifier {0:?}")]
    InvalidSlug(String),
}
