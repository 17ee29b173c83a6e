//! Estimate computation

use serde::Serialize;
use std::fmt;

use super::{Additional, BasePolicy, EstimateConfig, EstimateInput, Feature};

/// Per-page weights for the first pages under [`BasePolicy::Weighted`]
pub const PAGE_WEIGHTS: [f64; 5] = [1.0, 0.95, 0.90, 0.85, 0.75];

/// Weight of every page after the ones in [`PAGE_WEIGHTS`]
pub const TAIL_WEIGHT: f64 = 0.50;

pub const HOURS_PER_DAY: u32 = 8;
pub const HOURS_PER_WEEK: u32 = 40;

/// Derived estimate, recomputed from scratch on every input change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EstimateResult {
    pub base_hours: u32,
    pub total_hours: u32,
    pub days: u32,
    pub weeks: u32,
}

/// Unrounded base hours for `pages` pages at `design_hours` scaled by `factor`
///
/// Flat multiplies `(pages x design_hours) x factor` in that order; rounded
/// totals near `.5` depend on it.
pub fn base_hours(policy: BasePolicy, pages: u32, design_hours: f64, factor: f64) -> f64 {
    match policy {
        BasePolicy::Flat => pages as f64 * design_hours * factor,
        BasePolicy::Weighted => {
            let per_page = design_hours * factor;
            (0..pages as usize)
                .map(|p| per_page * PAGE_WEIGHTS.get(p).copied().unwrap_or(TAIL_WEIGHT))
                .sum()
        }
    }
}

pub fn days_for(total_hours: u32) -> u32 {
    total_hours.div_ceil(HOURS_PER_DAY)
}

pub fn weeks_for(total_hours: u32) -> u32 {
    total_hours.div_ceil(HOURS_PER_WEEK)
}

/// Compute the estimate for `input` against the hour table `config`
pub fn compute_estimate(input: &EstimateInput, config: &EstimateConfig) -> EstimateResult {
    let base = base_hours(
        config.policy,
        input.pages(),
        config.design_hours(input.design),
        config.builder_factor(input.builder),
    );

    let features_hours: u32 = input.features().map(|f| config.feature_hours(f)).sum();
    let additionals_hours: u32 = input
        .additionals()
        .map(|a| config.additional_hours(a))
        .sum();

    let with_extras = base + features_hours as f64 + additionals_hours as f64;
    let total = (with_extras * (1.0 + input.buffer() as f64 / 100.0)).round() as u32;

    EstimateResult {
        base_hours: base.round() as u32,
        total_hours: total,
        days: days_for(total),
        weeks: weeks_for(total),
    }
}

/// An estimate together with the selections that produced it
#[derive(Debug, Clone, Serialize)]
pub struct EstimateSummary {
    #[serde(flatten)]
    pub result: EstimateResult,
    pub policy: BasePolicy,
    pub pages: u32,
    pub design: String,
    pub builder: String,
    pub buffer: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additionals: Option<String>,
}

impl EstimateSummary {
    pub fn new(input: &EstimateInput, config: &EstimateConfig) -> Self {
        let features = join_names(
            Feature::ALL
                .iter()
                .filter(|f| input.is_feature_selected(**f))
                .map(|f| f.label()),
        );
        let additionals = join_names(
            Additional::ALL
                .iter()
                .filter(|a| input.is_additional_selected(**a))
                .map(|a| a.label()),
        );

        Self {
            result: compute_estimate(input, config),
            policy: config.policy,
            pages: input.pages(),
            design: input.design.key().to_string(),
            builder: input.builder.key().to_string(),
            buffer: input.buffer(),
            features,
            additionals,
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

impl fmt::Display for EstimateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total: {}h", self.result.total_hours)?;
        writeln!(f, "Contingency Time: {}%", self.buffer)?;
        writeln!(f, "Estimation summary:")?;
        writeln!(f, "  Base Hours: {}", self.result.base_hours)?;
        writeln!(f, "  Days: {}", self.result.days)?;
        writeln!(f, "  Weeks: {}", self.result.weeks)?;
        writeln!(f, "  Pages: {}", self.pages)?;
        writeln!(f, "  Design: {}", self.design)?;
        write!(f, "  Builder: {}", self.builder)?;
        if let Some(features) = &self.features {
            write!(f, "\n  Features: {}", features)?;
        }
        if let Some(additionals) = &self.additionals {
            write!(f, "\n  Additionals: {}", additionals)?;
        }
        Ok(())
    }
}
