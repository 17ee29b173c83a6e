//! Generator module - renders the site into static HTML with built-in Tera templates

use anyhow::Result;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{MarkdownRenderer, Post, PostDetail, WorkItem};
use crate::templates::{ConfigData, EstimatorData, PostData, TemplateRenderer, ToolData, WorkData};
use crate::Portfolio;

/// Static site generator using Tera templates
pub struct Generator {
    site: Portfolio,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Portfolio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );

        Ok(Self {
            site: site.clone(),
            renderer,
            markdown,
        })
    }

    /// Generate the entire site
    ///
    /// `posts` and `works` are expected in listing order; `details` are the
    /// posts that get their own page.
    pub fn generate(&self, posts: &[Post], details: &[PostDetail], works: &[WorkItem]) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_static_assets()?;
        self.write_stylesheet()?;

        let config_data = ConfigData::from(&self.site.config);
        let post_data: Vec<PostData> = posts.iter().map(PostData::from).collect();
        let work_data: Vec<WorkData> = works.iter().map(WorkData::from).collect();

        self.generate_home(&post_data, &work_data, &config_data)?;
        self.generate_blog_index(&post_data, &config_data)?;
        self.generate_post_pages(details, &config_data)?;
        self.generate_works_page(&work_data, &config_data)?;
        self.generate_projects_page(&config_data)?;
        self.generate_estimator_page(&config_data)?;

        Ok(())
    }

    /// Create a base context with common variables
    fn create_base_context(&self, config_data: &ConfigData, heading: &str) -> Context {
        let mut context = Context::new();
        context.insert("config", config_data);
        context.insert("heading", heading);
        context.insert("page_title", &page_title(heading, &config_data.title));
        context.insert("page_description", &config_data.description);
        context.insert("article", &Option::<PostData>::None);
        context.insert("current_year", &chrono::Local::now().format("%Y").to_string());
        context
    }

    fn generate_home(
        &self,
        posts: &[PostData],
        works: &[WorkData],
        config_data: &ConfigData,
    ) -> Result<()> {
        let recent = self.site.config.recent_count;
        let mut context = self.create_base_context(config_data, &config_data.title);
        context.insert("page_title", &format!("Home | {}", config_data.title));
        context.insert("posts", &posts[..recent.min(posts.len())]);
        context.insert("works", &works[..recent.min(works.len())]);

        let html = self.renderer.render("home.html", &context)?;
        self.write_page("index.html", &html)
    }

    fn generate_blog_index(&self, posts: &[PostData], config_data: &ConfigData) -> Result<()> {
        let mut context = self.create_base_context(config_data, "Latest Articles");
        context.insert("page_title", &page_title("Blog", &config_data.title));
        context.insert("posts", posts);

        let html = self.renderer.render("blog.html", &context)?;
        self.write_page("blog/index.html", &html)
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, details: &[PostDetail], config_data: &ConfigData) -> Result<()> {
        for detail in details {
            let article = PostData::from(&detail.post);
            let body = self.markdown.render(&detail.content)?;

            let description = if article.description.is_empty() {
                &config_data.description
            } else {
                &article.description
            };

            let mut context = self.create_base_context(config_data, &article.title);
            context.insert("page_description", description);
            context.insert("article", &Some(&article));
            context.insert("body", &body);

            let html = self.renderer.render("post.html", &context)?;
            self.write_page(&format!("blog/{}/index.html", article.slug), &html)?;
        }

        Ok(())
    }

    fn generate_works_page(&self, works: &[WorkData], config_data: &ConfigData) -> Result<()> {
        let mut context = self.create_base_context(config_data, "Recent Work");
        context.insert("page_title", &page_title("Portfolio", &config_data.title));
        context.insert("works", works);

        let html = self.renderer.render("works.html", &context)?;
        self.write_page("recent-work/index.html", &html)
    }

    /// Tool cards: the estimator first, then `tools` from the config
    fn generate_projects_page(&self, config_data: &ConfigData) -> Result<()> {
        let tools: Vec<ToolData> = std::iter::once(ToolData::estimator(&config_data.root))
            .chain(self.site.config.tools.iter().map(ToolData::from))
            .collect();

        let mut context = self.create_base_context(config_data, "Recent Projects");
        context.insert("page_title", &page_title("Tools", &config_data.title));
        context.insert("tools", &tools);

        let html = self.renderer.render("projects.html", &context)?;
        self.write_page("projects/index.html", &html)
    }

    fn generate_estimator_page(&self, config_data: &ConfigData) -> Result<()> {
        let estimator = EstimatorData::new(self.site.config.estimator.policy);

        let mut context = self.create_base_context(config_data, "WordPress Project Time Estimator");
        context.insert(
            "page_description",
            "Estimate how long your next WordPress website will take to build.",
        );
        context.insert("estimator", &estimator);

        let html = self.renderer.render("estimator.html", &context)?;
        self.write_page("projects/wp-estimator/index.html", &html)
    }

    /// Stylesheet for highlighted code blocks
    fn write_stylesheet(&self) -> Result<()> {
        let css = self.markdown.stylesheet()?;
        self.write_page("css/highlight.css", &css)
    }

    fn write_page(&self, relative: &str, contents: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, contents)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy the static directory into the output as-is
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_hidden(path) {
                continue;
            }

            let relative = path.strip_prefix(static_dir).unwrap_or(path);
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            tracing::debug!("Copied: {:?}", dest);
        }

        Ok(())
    }
}

fn page_title(title: &str, site_title: &str) -> String {
    format!("{} | {}", title, site_title)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
