//! Blog post models

use chrono::NaiveDateTime;
use serde::Serialize;

use super::frontmatter::{parse_date_string, PostFrontMatter};

/// A blog post as shown in listings
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// File name without extension
    pub slug: String,

    pub title: String,

    /// Date exactly as written in the front-matter
    pub date: String,

    /// Parsed `date`; `None` when it matched no known format
    pub published: Option<NaiveDateTime>,

    pub description: String,

    pub image: Option<String>,

    pub tags: Vec<String>,
}

impl Post {
    pub fn from_front_matter(slug: String, fm: PostFrontMatter) -> Self {
        let published = parse_date_string(&fm.date);
        if published.is_none() {
            tracing::warn!("Post {:?} has an unrecognized date {:?}", slug, fm.date);
        }

        Self {
            slug,
            title: fm.title,
            date: fm.date,
            published,
            description: fm.description.unwrap_or_default(),
            image: fm.image,
            tags: fm.tags,
        }
    }

    /// Date for display, normalized when it could be parsed
    pub fn display_date(&self) -> String {
        self.published
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.date.clone())
    }
}

/// A single post with its body
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,

    /// Raw MDX body
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter(date: &str) -> PostFrontMatter {
        PostFrontMatter {
            title: "Hello".to_string(),
            date: date.to_string(),
            description: None,
            image: None,
            tags: vec!["a".to_string()],
        }
    }

    #[test]
    fn test_from_front_matter() {
        let post = Post::from_front_matter("hello".to_string(), front_matter("2024-02-03 09:00"));
        assert_eq!(post.slug, "hello");
        assert_eq!(post.description, "");
        assert_eq!(post.display_date(), "2024-02-03");
        assert!(post.published.is_some());
    }

    #[test]
    fn test_unparsed_date_displays_raw() {
        let post = Post::from_front_matter("x".to_string(), front_matter("Spring 2024"));
        assert!(post.published.is_none());
        assert_eq!(post.display_date(), "Spring 2024");
    }
}
