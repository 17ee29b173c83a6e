//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::generator::Generator;
use crate::Portfolio;

/// Load all content and render the site
pub async fn run(site: &Portfolio) -> Result<()> {
    let start = Instant::now();

    let loader = site.loader();
    let posts = loader.list_posts().await;
    let works = loader.list_works().await;

    let mut details = Vec::new();
    for slug in loader.list_post_slugs().await {
        if let Some(detail) = loader.get_post_by_slug(&slug).await {
            details.push(detail);
        }
    }

    tracing::info!(
        "Loaded {} posts ({} pages) and {} works",
        posts.len(),
        details.len(),
        works.len()
    );

    let generator = Generator::new(site)?;
    generator.generate(&posts, &details, &works)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Watch content, static assets and config, regenerating on every change
pub async fn watch(site: &Portfolio) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<DebounceEventResult>(16);

    let mut debouncer = new_debouncer(Duration::from_millis(500), move |res: DebounceEventResult| {
        let _ = tx.blocking_send(res);
    })?;

    let content_dir = site.base_dir.join(&site.config.content_dir);
    let config_path = site.base_dir.join("_config.yml");

    for dir in [&content_dir, &site.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    while let Some(result) = rx.recv().await {
        match result {
            Ok(events) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| !is_ignored(&e.path))
                    .collect();
                if relevant.is_empty() {
                    continue;
                }
                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Config may have changed as well
                let current = match Portfolio::new(&site.base_dir) {
                    Ok(current) => current,
                    Err(e) => {
                        tracing::error!("Failed to reload _config.yml: {}", e);
                        continue;
                    }
                };
                if let Err(e) = run(&current).await {
                    tracing::error!("Generation failed: {}", e);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

fn is_ignored(path: &std::path::Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.starts_with('.') || name.ends_with('~') || path.components().any(|c| c.as_os_str() == ".git")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_is_ignored() {
        assert!(is_ignored(Path::new("content/posts/.DS_Store")));
        assert!(is_ignored(Path::new("content/posts/a.mdx~")));
        assert!(is_ignored(Path::new("repo/.git/index")));
        assert!(!is_ignored(Path::new("content/posts/a.mdx")));
    }

    #[tokio::test]
    async fn test_run_renders_loaded_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let site = Portfolio::new(dir.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::create_dir_all(&site.works_dir).unwrap();
        fs::write(
            site.posts_dir.join("good.mdx"),
            "---\ntitle: Good\ndate: 2024-01-01\n---\nHello\n",
        )
        .unwrap();
        fs::write(site.posts_dir.join("bad.mdx"), "---\ndate: 2024-01-01\n---\n").unwrap();
        fs::write(
            site.works_dir.join("shop.mdx"),
            "---\ntitle: Shop\norder: 1\n---\n",
        )
        .unwrap();

        run(&site).await.unwrap();

        assert!(site.public_dir.join("blog/good/index.html").exists());
        assert!(!site.public_dir.join("blog/bad/index.html").exists());
        let works = fs::read_to_string(site.public_dir.join("recent-work/index.html")).unwrap();
        assert!(works.contains("Shop"));
    }
}
