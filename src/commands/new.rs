//! Create a new post or work document

use anyhow::Result;
use std::path::PathBuf;
use tokio::fs;

use crate::Portfolio;

/// Create a new post or work item and return its path
///
/// Works are appended to the showcase: their `order` is one above the
/// highest existing order.
pub async fn create_document(site: &Portfolio, title: &str, layout: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let extension = site
        .config
        .extensions
        .first()
        .map(String::as_str)
        .unwrap_or("mdx");

    // Titles are written as double-quoted YAML scalars
    let quoted_title = serde_json::to_string(title)?;

    let (target_dir, content) = match layout {
        "post" => {
            let date = chrono::Local::now().format("%Y-%m-%d");
            let content = format!(
                "---\ntitle: {}\ndate: {}\ndescription:\ntags:\n---\n\n",
                quoted_title, date
            );
            (&site.posts_dir, content)
        }
        "work" => {
            let order = site
                .loader()
                .list_works()
                .await
                .iter()
                .map(|w| w.order)
                .max()
                .unwrap_or(0)
                + 1;
            let content = format!(
                "---\ntitle: {}\norder: {}\ndescription:\nimage:\nlink:\ntechnologies:\n---\n",
                quoted_title, order
            );
            (&site.works_dir, content)
        }
        _ => anyhow::bail!("Unknown layout: {}. Available: post, work", layout),
    };

    fs::create_dir_all(target_dir).await?;

    let file_path = target_dir.join(format!("{}.{}", slug, extension));
    if fs::try_exists(&file_path).await? {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, content).await?;
    tracing::debug!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_post_is_loadable() {
        let dir = TempDir::new().unwrap();
        let site = Portfolio::new(dir.path()).unwrap();

        let path = create_document(&site, "Speed: A Guide", "post").await.unwrap();
        assert_eq!(path, site.posts_dir.join("speed-a-guide.mdx"));

        let detail = site.loader().get_post_by_slug("speed-a-guide").await.unwrap();
        assert_eq!(detail.post.title, "Speed: A Guide");
        assert!(detail.post.published.is_some());
    }

    #[tokio::test]
    async fn test_new_work_takes_next_order() {
        let dir = TempDir::new().unwrap();
        let site = Portfolio::new(dir.path()).unwrap();

        create_document(&site, "Coffee Shop", "work").await.unwrap();
        create_document(&site, "Law Firm", "work").await.unwrap();

        let works = site.loader().list_works().await;
        assert_eq!(works.len(), 2);
        assert_eq!(works[0].title, "Law Firm");
        assert_eq!(works[0].order, 2);
        assert_eq!(works[1].order, 1);
    }

    #[tokio::test]
    async fn test_refuses_existing_and_unknown() {
        let dir = TempDir::new().unwrap();
        let site = Portfolio::new(dir.path()).unwrap();

        create_document(&site, "Hello", "post").await.unwrap();
        assert!(create_document(&site, "Hello", "post").await.is_err());
        assert!(create_document(&site, "Hello", "page").await.is_err());
        assert!(create_document(&site, "!!!", "post").await.is_err());
    }
}
