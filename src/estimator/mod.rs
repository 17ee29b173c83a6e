//! WordPress project time estimator
//!
//! A pure calculator: an [`EstimateInput`] and a fixed [`EstimateConfig`]
//! produce an [`EstimateResult`]. Nothing is cached between calls.

mod catalog;
mod engine;
mod input;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use catalog::{Additional, Builder, DesignComplexity, EstimateConfig, Feature};
pub use catalog::{FLAT_RATE, WEIGHTED};
pub use engine::{
    base_hours, compute_estimate, days_for, weeks_for, EstimateResult, EstimateSummary,
    HOURS_PER_DAY, HOURS_PER_WEEK, PAGE_WEIGHTS, TAIL_WEIGHT,
};
pub use input::{clamp_buffer, clamp_pages, parse_pages, EstimateInput};
pub use input::{BUFFER_STEP, MAX_BUFFER, MAX_PAGES, MIN_BUFFER, MIN_PAGES};

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("unknown {kind} key: {key}")]
    InvalidKey { kind: &'static str, key: String },
}

/// How page count turns into base hours
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasePolicy {
    /// Every page costs the same
    Flat,
    /// Pages 1-5 are weighted 1.0, 0.95, 0.90, 0.85, 0.75; later pages 0.5
    #[default]
    Weighted,
}

impl FromStr for BasePolicy {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(BasePolicy::Flat),
            "weighted" => Ok(BasePolicy::Weighted),
            _ => Err(EstimateError::InvalidKey {
                kind: "policy",
                key: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasePolicy::Flat => f.write_str("flat"),
            BasePolicy::Weighted => f.write_str("weighted"),
        }
    }
}

/// Estimate `input` with the table calibrated for `policy`
pub fn estimate(input: &EstimateInput, policy: BasePolicy) -> EstimateSummary {
    EstimateSummary::new(input, EstimateConfig::for_policy(policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_keys() {
        assert_eq!("flat".parse::<BasePolicy>().unwrap(), BasePolicy::Flat);
        assert_eq!("Weighted".parse::<BasePolicy>().unwrap(), BasePolicy::Weighted);
        assert!("average".parse::<BasePolicy>().is_err());
        assert_eq!(BasePolicy::default().to_string(), "weighted");
    }

    #[test]
    fn test_estimate_uses_matching_table() {
        let input = EstimateInput::new().with_feature(Feature::Custom).with_pages(1);
        let flat = estimate(&input, BasePolicy::Flat);
        let weighted = estimate(&input, BasePolicy::Weighted);
        // flat: (4.5 + 25) x 1.2 = 35.4; weighted: (5 + 18) x 1.2 = 27.6
        assert_eq!(flat.result.total_hours, 35);
        assert_eq!(weighted.result.total_hours, 28);
        assert_eq!(flat.policy, BasePolicy::Flat);
    }
}
