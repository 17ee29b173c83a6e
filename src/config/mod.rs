//! Configuration module

mod site;

pub use site::EstimatorConfig;
pub use site::HighlightConfig;
pub use site::SiteConfig;
pub use site::ToolConfig;
