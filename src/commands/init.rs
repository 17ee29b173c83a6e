//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Portfolio configuration

# Site
title: Portfolio
description: WordPress development and web design
author: ''
keywords:
  - wordpress
  - web design

# URL
url: http://localhost:4000
root: /

# Directory
content_dir: content
posts_dir: posts
works_dir: works
static_dir: static
public_dir: public

# Writing
extensions:
  - mdx
excerpt_length: 120
recent_count: 3

highlight:
  theme: base16-ocean.dark
  line_number: false

# Estimator: weighted (diminishing returns per page) or flat
estimator:
  policy: weighted
"#;

const SAMPLE_POST: &str = r#"---
title: Hello World
date: 2024-01-01
description: The first post on this site.
tags: wordpress, welcome
---

Welcome! Posts live in `content/posts` and are written in MDX.

```php
<?php echo 'Hello World';
```
"#;

const SAMPLE_WORK: &str = r#"---
title: Sample Project
order: 1
description: A WordPress build shown in the portfolio.
image: /images/sample.png
link: https://example.com
technologies: WordPress, Elementor
---
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/works"))?;
    fs::create_dir_all(target_dir.join("static/images"))?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG)?;
    write_if_missing(&target_dir.join("content/posts/hello-world.mdx"), SAMPLE_POST)?;
    write_if_missing(&target_dir.join("content/works/sample-project.mdx"), SAMPLE_WORK)?;

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("Skipping existing file: {:?}", path);
        return Ok(());
    }
    fs::write(path, contents)?;
    tracing::debug!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Portfolio;

    #[tokio::test]
    async fn test_init_site_is_loadable() {
        let dir = tempfile::TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let site = Portfolio::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "Portfolio");

        let posts = site.loader().list_posts().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");
        assert_eq!(posts[0].tags, vec!["wordpress", "welcome"]);

        let works = site.loader().list_works().await;
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].technologies, vec!["WordPress", "Elementor"]);
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let config = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
