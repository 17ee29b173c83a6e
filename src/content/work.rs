//! Work showcase items

use serde::Serialize;

use super::frontmatter::WorkFrontMatter;

/// A project in the recent-work showcase
#[derive(Debug, Clone, Serialize)]
pub struct WorkItem {
    pub title: String,
    /// Listing position; higher comes first
    pub order: i64,
    pub image: Option<String>,
    pub link: Option<String>,
    pub technologies: Vec<String>,
    pub description: String,
}

impl From<WorkFrontMatter> for WorkItem {
    fn from(fm: WorkFrontMatter) -> Self {
        Self {
            title: fm.title,
            order: fm.order,
            image: fm.image,
            link: fm.link,
            technologies: fm.technologies,
            description: fm.description.unwrap_or_default(),
        }
    }
}
