//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary; a site only supplies content.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{SiteConfig, ToolConfig};
use crate::content::{Post, WorkItem};
use crate::estimator::{
    self, Additional, BasePolicy, Builder, DesignComplexity, EstimateConfig, EstimateInput,
    EstimateSummary, Feature, PAGE_WEIGHTS, TAIL_WEIGHT,
};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Content is authored locally and URLs must render unescaped
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("works.html", include_str!("site/works.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("estimator.html", include_str!("site/estimator.html")),
            // Partials
            (
                "partials/head.html",
                include_str!("site/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("site/partials/post_card.html"),
            ),
            (
                "partials/work_card.html",
                include_str!("site/partials/work_card.html"),
            ),
            (
                "partials/tool_card.html",
                include_str!("site/partials/tool_card.html"),
            ),
        ])?;

        tera.register_filter("truncate_text", truncate_text_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Cut `text` to `limit` characters, appending `...` when cut
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let truncated: String = text.chars().take(limit).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

/// Tera filter: `truncate_text(limit=120)`
fn truncate_text_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_text", "value", String, value);
    let limit = match args.get("limit") {
        Some(val) => tera::try_get_value!("truncate_text", "limit", usize, val),
        None => 120,
    };
    Ok(tera::Value::String(truncate_text(&s, limit)))
}

// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
    pub keywords: Vec<String>,
    pub excerpt_length: usize,
}

impl From<&SiteConfig> for ConfigData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
            root: format!("/{}", config.root.trim_matches('/'))
                .trim_end_matches('/')
                .to_string()
                + "/",
            keywords: config.keywords.clone(),
            excerpt_length: config.excerpt_length,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    /// Display date
    pub date: String,
    /// Whether `date` was a recognized date
    pub published: bool,
    pub description: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.display_date(),
            published: post.published.is_some(),
            description: post.description.clone(),
            image: post.image.clone(),
            tags: post.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkData {
    pub title: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub technologies: Vec<String>,
    pub description: String,
}

impl From<&WorkItem> for WorkData {
    fn from(work: &WorkItem) -> Self {
        Self {
            title: work.title.clone(),
            image: work.image.clone(),
            link: work.link.clone(),
            technologies: work.technologies.clone(),
            description: work.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolData {
    pub title: String,
    pub url: String,
    pub image: Option<String>,
    pub description: String,
    /// Opens in a new tab
    pub external: bool,
}

impl ToolData {
    /// Card for the built-in estimator page under `root`
    pub fn estimator(root: &str) -> Self {
        Self {
            title: "WordPress Estimator".to_string(),
            url: format!("{}projects/wp-estimator/", root),
            image: None,
            description: "Quickly estimate the timeline of your next WordPress project \
                          with this simple tool."
                .to_string(),
            external: false,
        }
    }
}

impl From<&ToolConfig> for ToolData {
    fn from(tool: &ToolConfig) -> Self {
        Self {
            title: tool.title.clone(),
            url: tool.url.clone(),
            image: tool.image.clone(),
            description: tool.description.clone(),
            external: tool.url.starts_with("http://") || tool.url.starts_with("https://"),
        }
    }
}

/// One priced option of an estimator catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRow {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSection {
    pub title: &'static str,
    pub rows: Vec<CatalogRow>,
}

/// The estimator page: active hour table plus the estimate for default input
#[derive(Debug, Clone, Serialize)]
pub struct EstimatorData {
    pub policy: BasePolicy,
    /// Per-page weights, for the weighted policy only
    pub page_weights: Option<String>,
    pub sections: Vec<CatalogSection>,
    pub summary: EstimateSummary,
    pub min_pages: u32,
    pub max_pages: u32,
    pub min_buffer: u32,
    pub max_buffer: u32,
    pub buffer_step: u32,
}

impl EstimatorData {
    pub fn new(policy: BasePolicy) -> Self {
        let config = EstimateConfig::for_policy(policy);

        let sections = vec![
            CatalogSection {
                title: "Design complexity",
                rows: DesignComplexity::ALL
                    .iter()
                    .map(|&d| row(d.key(), d.label(), format!("{}h / page", config.design_hours(d))))
                    .collect(),
            },
            CatalogSection {
                title: "Builder",
                rows: Builder::ALL
                    .iter()
                    .map(|&b| row(b.key(), b.label(), format!("x{}", config.builder_factor(b))))
                    .collect(),
            },
            CatalogSection {
                title: "Special functionality",
                rows: Feature::ALL
                    .iter()
                    .map(|&f| row(f.key(), f.label(), format!("{}h", config.feature_hours(f))))
                    .collect(),
            },
            CatalogSection {
                title: "Additional services",
                rows: Additional::ALL
                    .iter()
                    .map(|&a| row(a.key(), a.label(), format!("{}h", config.additional_hours(a))))
                    .collect(),
            },
        ];

        let page_weights = match policy {
            BasePolicy::Weighted => {
                let weights: Vec<String> = PAGE_WEIGHTS.iter().map(|w| w.to_string()).collect();
                Some(format!("{}, then {} per page", weights.join(", "), TAIL_WEIGHT))
            }
            BasePolicy::Flat => None,
        };

        Self {
            policy,
            page_weights,
            sections,
            summary: estimator::estimate(&EstimateInput::default(), policy),
            min_pages: estimator::MIN_PAGES,
            max_pages: estimator::MAX_PAGES,
            min_buffer: estimator::MIN_BUFFER,
            max_buffer: estimator::MAX_BUFFER,
            buffer_step: estimator::BUFFER_STEP,
        }
    }
}

fn row(key: &'static str, label: &'static str, value: String) -> CatalogRow {
    CatalogRow { key, label, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 120), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("abc", 3), "abc");
        assert_eq!(truncate_text("ñandú", 2), "ña...");
    }

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_estimator_data_follows_policy() {
        let weighted = EstimatorData::new(BasePolicy::Weighted);
        assert_eq!(weighted.sections.len(), 4);
        assert_eq!(weighted.sections[0].rows[1].value, "5h / page");
        assert_eq!(weighted.sections[1].rows[3].value, "x1.25");
        assert_eq!(weighted.sections[2].rows[5].label, "Custom");
        assert_eq!(weighted.sections[2].rows[5].value, "18h");
        assert_eq!(weighted.sections[3].rows[0].label, "Content/Posts migration");
        assert_eq!(
            weighted.page_weights.as_deref(),
            Some("1, 0.95, 0.9, 0.85, 0.75, then 0.5 per page")
        );
        assert_eq!(weighted.summary.result.total_hours, 27);

        let flat = EstimatorData::new(BasePolicy::Flat);
        assert_eq!(flat.sections[0].rows[1].value, "4.5h / page");
        assert_eq!(flat.sections[2].rows[5].value, "25h");
        assert!(flat.page_weights.is_none());
        assert_eq!(flat.summary.result.base_hours, 23);
    }

    #[test]
    fn test_tool_data() {
        let tool = ToolData::estimator("/site/");
        assert_eq!(tool.url, "/site/projects/wp-estimator/");
        assert!(!tool.external);

        let config = ToolConfig {
            title: "Post Bulk Actions".to_string(),
            url: "https://example.com/ext".to_string(),
            image: None,
            description: String::new(),
        };
        assert!(ToolData::from(&config).external);
    }

    #[test]
    fn test_root_is_normalized() {
        let mut config = SiteConfig::default();
        assert_eq!(ConfigData::from(&config).root, "/");
        config.root = "portfolio".to_string();
        assert_eq!(ConfigData::from(&config).root, "/portfolio/");
        config.root = "/blog/".to_string();
        assert_eq!(ConfigData::from(&config).root, "/blog/");
    }
}
