//! Content loader - lists and looks up posts and work items
//!
//! Every read here fails soft. A missing or unreadable directory yields an
//! empty listing, a document that cannot be read or parsed is skipped, and a
//! lookup that fails for any reason yields `None`. Each failure is logged.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::task::JoinSet;

use super::frontmatter::{self, PostFrontMatter, WorkFrontMatter};
use super::{ContentError, Post, PostDetail, WorkItem};
use crate::Portfolio;

/// Loads content documents for a site
pub struct ContentLoader<'a> {
    site: &'a Portfolio,
}

impl<'a> ContentLoader<'a> {
    pub fn new(site: &'a Portfolio) -> Self {
        Self { site }
    }

    /// All posts, newest first
    ///
    /// Posts with the same date keep slug order. Posts whose date could
    /// not be parsed come last.
    pub async fn list_posts(&self) -> Vec<Post> {
        let files = match self.post_paths().await {
            Ok(files) => files,
            Err(e) => {
                tracing::error!("Error reading the posts directory: {}", e);
                return Vec::new();
            }
        };

        let mut posts = load_all(files, parse_post).await;
        posts.sort_by(|a, b| b.published.cmp(&a.published));
        posts
    }

    /// Identifiers of every post document, each listed once, in slug order
    pub async fn list_post_slugs(&self) -> Vec<String> {
        match self.post_paths().await {
            Ok(files) => files.iter().filter_map(|p| slug_of(p)).collect(),
            Err(e) => {
                tracing::error!("Error reading the posts directory: {}", e);
                Vec::new()
            }
        }
    }

    /// A single post with its body, or `None` when it cannot be loaded
    pub async fn get_post_by_slug(&self, slug: &str) -> Option<PostDetail> {
        match self.load_post_detail(slug).await {
            Ok(Some(detail)) => Some(detail),
            Ok(None) => {
                tracing::warn!("Post {:?} not found", slug);
                None
            }
            Err(e) => {
                tracing::error!("Error loading post {:?}: {}", slug, e);
                None
            }
        }
    }

    /// All work items, highest `order` first
    ///
    /// Items with equal `order` keep file-name order.
    pub async fn list_works(&self) -> Vec<WorkItem> {
        let files = match self.document_paths(&self.site.works_dir).await {
            Ok(files) => files,
            Err(e) => {
                tracing::error!("Error reading the works directory: {}", e);
                return Vec::new();
            }
        };

        let mut works = load_all(files, parse_work).await;
        works.sort_by(|a, b| b.order.cmp(&a.order));
        works
    }

    async fn load_post_detail(&self, slug: &str) -> Result<Option<PostDetail>, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }

        for ext in &self.site.config.extensions {
            let path = self
                .site
                .posts_dir
                .join(format!("{}.{}", slug, ext.trim_start_matches('.')));

            let read = fs::read_to_string(&path).await;
            let source = match read {
                Ok(source) => source,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(source) => return Err(ContentError::Read { path, source }),
            };

            let (fm, body) = frontmatter::parse::<PostFrontMatter>(&path, &source)?;
            return Ok(Some(PostDetail {
                post: Post::from_front_matter(slug.to_string(), fm),
                content: body.to_string(),
            }));
        }

        Ok(None)
    }

    /// Post documents, one per slug
    ///
    /// When several files share a slug, the one whose extension comes first
    /// in `extensions` wins, matching the lookup order of `get_post_by_slug`.
    async fn post_paths(&self) -> Result<Vec<PathBuf>, ContentError> {
        let mut paths = self.document_paths(&self.site.posts_dir).await?;
        let extensions = &self.site.config.extensions;
        let rank = |path: &Path| {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(|e| extensions.iter().position(|x| x.trim_start_matches('.') == e))
                .unwrap_or(usize::MAX)
        };

        paths.sort_by(|a, b| {
            a.file_stem()
                .cmp(&b.file_stem())
                .then_with(|| rank(a).cmp(&rank(b)))
        });
        paths.dedup_by(|later, earlier| later.file_stem() == earlier.file_stem());
        Ok(paths)
    }

    /// Document files directly inside `dir`, sorted by file name
    async fn document_paths(&self, dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
        let read_dir_error = |source| ContentError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir).await.map_err(read_dir_error)?;
        let mut paths = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
            let path = entry.path();
            let is_document = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| self.site.config.is_content_extension(e))
                .unwrap_or(false);
            if !is_document {
                continue;
            }
            match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => continue,
                _ => paths.push(path),
            }
        }

        paths.sort();
        Ok(paths)
    }
}

/// Read and parse `files` concurrently, returning successes in input order
async fn load_all<T, F>(files: Vec<PathBuf>, parse: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(&Path, &str) -> Result<T, ContentError> + Copy + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        tasks.spawn(async move {
            let read = fs::read_to_string(&path).await;
            let result = match read {
                Ok(source) => parse(&path, &source),
                Err(source) => Err(ContentError::Read { path, source }),
            };
            (index, result)
        });
    }

    let mut loaded = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(item))) => loaded.push((index, item)),
            Ok((_, Err(e))) => tracing::warn!("Skipping document: {}", e),
            Err(e) => tracing::error!("Document task failed: {}", e),
        }
    }

    loaded.sort_by_key(|(index, _)| *index);
    loaded.into_iter().map(|(_, item)| item).collect()
}

fn parse_post(path: &Path, source: &str) -> Result<Post, ContentError> {
    let slug = slug_of(path).ok_or_else(|| ContentError::InvalidSlug(path.display().to_string()))?;
    let (fm, _) = frontmatter::parse::<PostFrontMatter>(path, source)?;
    Ok(Post::from_front_matter(slug, fm))
}

fn parse_work(path: &Path, source: &str) -> Result<WorkItem, ContentError> {
    let (fm, _) = frontmatter::parse::<WorkFrontMatter>(path, source)?;
    Ok(WorkItem::from(fm))
}

/// A post's identifier: its file name without extension
fn slug_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && !slug.contains("..")
        && !slug.contains(['/', '\\'])
}
