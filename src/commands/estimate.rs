//! Estimate a WordPress project from the command line

use anyhow::Result;

use crate::estimator::{
    self, Additional, BasePolicy, Builder, DesignComplexity, EstimateInput, EstimateSummary,
    Feature,
};
use crate::Portfolio;

/// Raw estimator choices as given on the command line
#[derive(Debug, Clone)]
pub struct EstimateOptions {
    /// Page count as typed; coerced like a form field
    pub pages: String,
    pub design: DesignComplexity,
    pub builder: Builder,
    pub features: Vec<Feature>,
    pub additionals: Vec<Additional>,
    pub buffer: i64,
    /// Overrides `estimator.policy` from `_config.yml`
    pub policy: Option<BasePolicy>,
    pub json: bool,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        let input = EstimateInput::default();
        Self {
            pages: input.pages().to_string(),
            design: input.design,
            builder: input.builder,
            features: Vec::new(),
            additionals: Vec::new(),
            buffer: i64::from(input.buffer()),
            policy: None,
            json: false,
        }
    }
}

impl EstimateOptions {
    /// Build a clamped estimator input
    pub fn to_input(&self) -> EstimateInput {
        let mut input = EstimateInput::new()
            .with_design(self.design)
            .with_builder(self.builder)
            .with_buffer(self.buffer);
        input.set_pages_str(&self.pages);
        for feature in &self.features {
            input.select_feature(*feature);
        }
        for additional in &self.additionals {
            input.select_additional(*additional);
        }
        input
    }
}

/// Compute the summary using the site's configured policy unless overridden
pub fn summarize(site: &Portfolio, options: &EstimateOptions) -> EstimateSummary {
    let policy = options.policy.unwrap_or(site.config.estimator.policy);
    tracing::debug!("Estimating with {} policy", policy);
    estimator::estimate(&options.to_input(), policy)
}

/// Print an estimate summary
pub fn run(site: &Portfolio, options: &EstimateOptions) -> Result<()> {
    let summary = summarize(site, options);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::path::PathBuf;

    fn site(policy: BasePolicy) -> Portfolio {
        let mut config = SiteConfig::default();
        config.estimator.policy = policy;
        Portfolio::with_config(PathBuf::from("."), config)
    }

    #[test]
    fn test_defaults_match_form_defaults() {
        let summary = summarize(&site(BasePolicy::Weighted), &EstimateOptions::default());
        assert_eq!(summary.pages, 5);
        assert_eq!(summary.buffer, 20);
        assert_eq!(summary.result.total_hours, 27);
        assert_eq!(summary.features, None);
    }

    #[test]
    fn test_input_is_coerced() {
        let options = EstimateOptions {
            pages: "120".to_string(),
            buffer: 3,
            features: vec![Feature::Forms, Feature::Forms],
            ..EstimateOptions::default()
        };
        let input = options.to_input();
        assert_eq!(input.pages(), 50);
        assert_eq!(input.buffer(), 10);
        assert_eq!(input.features().count(), 1);

        let options = EstimateOptions {
            pages: "abc".to_string(),
            ..EstimateOptions::default()
        };
        assert_eq!(options.to_input().pages(), 1);
    }

    #[test]
    fn test_policy_override() {
        let options = EstimateOptions::default();
        assert_eq!(summarize(&site(BasePolicy::Flat), &options).policy, BasePolicy::Flat);

        let options = EstimateOptions {
            policy: Some(BasePolicy::Weighted),
            ..EstimateOptions::default()
        };
        assert_eq!(
            summarize(&site(BasePolicy::Flat), &options).policy,
            BasePolicy::Weighted
        );
    }
}
