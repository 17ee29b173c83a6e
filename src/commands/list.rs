//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::Portfolio;

/// List site content by type
pub async fn run(site: &Portfolio, content_type: &str) -> Result<()> {
    let loader = site.loader();

    match content_type {
        "post" | "posts" => {
            let posts = loader.list_posts().await;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.display_date(), post.title, post.slug);
            }
        }
        "work" | "works" => {
            let works = loader.list_works().await;
            println!("Works ({}):", works.len());
            for work in works {
                println!(
                    "  {:>3} - {} [{}]",
                    work.order,
                    work.title,
                    work.technologies.join(", ")
                );
            }
        }
        "slug" | "slugs" => {
            let slugs = loader.list_post_slugs().await;
            println!("Slugs ({}):", slugs.len());
            for slug in slugs {
                println!("  {}", slug);
            }
        }
        "tag" | "tags" => {
            let posts = loader.list_posts().await;
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, work, slug, tag",
                content_type
            );
        }
    }

    Ok(())
}
