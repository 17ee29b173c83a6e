//! Estimator input and its coercion rules
//!
//! Page count and contingency buffer are clamped when they are set, so an
//! [`EstimateInput`] always holds values inside their valid ranges.

use serde::Serialize;
use std::collections::BTreeSet;

use super::{Additional, Builder, DesignComplexity, Feature};

pub const MIN_PAGES: u32 = 1;
pub const MAX_PAGES: u32 = 50;
pub const MIN_BUFFER: u32 = 10;
pub const MAX_BUFFER: u32 = 50;
pub const BUFFER_STEP: u32 = 5;

/// Parse a page count the way a number input field does
///
/// Leading integer digits are taken (`"12abc"` is 12, `"3.7"` is 3).
/// Anything without digits, and zero, falls back to 1 before clamping.
pub fn parse_pages(raw: &str) -> u32 {
    let value = leading_integer(raw).filter(|v| *v != 0).unwrap_or(1);
    clamp_pages(value)
}

/// Clamp a page count into `[MIN_PAGES, MAX_PAGES]`
pub fn clamp_pages(value: i64) -> u32 {
    value.clamp(MIN_PAGES as i64, MAX_PAGES as i64) as u32
}

/// Clamp a buffer percentage into `[MIN_BUFFER, MAX_BUFFER]` on a step of 5
pub fn clamp_buffer(value: i64) -> u32 {
    let clamped = value.clamp(MIN_BUFFER as i64, MAX_BUFFER as i64) as u32;
    let snapped = (clamped + BUFFER_STEP / 2) / BUFFER_STEP * BUFFER_STEP;
    snapped.clamp(MIN_BUFFER, MAX_BUFFER)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = &digits[..end];
    let value = magnitude.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// The current selection state of the estimator form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateInput {
    pages: u32,
    pub design: DesignComplexity,
    pub builder: Builder,
    features: BTreeSet<Feature>,
    additionals: BTreeSet<Additional>,
    buffer: u32,
}

impl Default for EstimateInput {
    fn default() -> Self {
        Self {
            pages: 5,
            design: DesignComplexity::Medium,
            builder: Builder::Elementor,
            features: BTreeSet::new(),
            additionals: BTreeSet::new(),
            buffer: 20,
        }
    }
}

impl EstimateInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn buffer(&self) -> u32 {
        self.buffer
    }

    pub fn set_pages(&mut self, pages: i64) {
        self.pages = clamp_pages(pages);
    }

    /// Set the page count from raw text input
    pub fn set_pages_str(&mut self, raw: &str) {
        self.pages = parse_pages(raw);
    }

    pub fn set_buffer(&mut self, buffer: i64) {
        self.buffer = clamp_buffer(buffer);
    }

    /// Flip a feature's selection, returning whether it is now selected
    pub fn toggle_feature(&mut self, feature: Feature) -> bool {
        if self.features.remove(&feature) {
            false
        } else {
            self.features.insert(feature);
            true
        }
    }

    /// Flip an additional service's selection, returning whether it is now selected
    pub fn toggle_additional(&mut self, additional: Additional) -> bool {
        if self.additionals.remove(&additional) {
            false
        } else {
            self.additionals.insert(additional);
            true
        }
    }

    pub fn select_feature(&mut self, feature: Feature) {
        self.features.insert(feature);
    }

    pub fn select_additional(&mut self, additional: Additional) {
        self.additionals.insert(additional);
    }

    pub fn is_feature_selected(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn is_additional_selected(&self, additional: Additional) -> bool {
        self.additionals.contains(&additional)
    }

    /// Selected features in catalog order
    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.features.iter().copied()
    }

    /// Selected additional services in catalog order
    pub fn additionals(&self) -> impl Iterator<Item = Additional> + '_ {
        self.additionals.iter().copied()
    }

    pub fn with_pages(mut self, pages: i64) -> Self {
        self.set_pages(pages);
        self
    }

    pub fn with_design(mut self, design: DesignComplexity) -> Self {
        self.design = design;
        self
    }

    pub fn with_builder(mut self, builder: Builder) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.select_feature(feature);
        self
    }

    pub fn with_additional(mut self, additional: Additional) -> Self {
        self.select_additional(additional);
        self
    }

    pub fn with_buffer(mut self, buffer: i64) -> Self {
        self.set_buffer(buffer);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pages_defaults_and_clamps() {
        assert_eq!(parse_pages("7"), 7);
        assert_eq!(parse_pages("0"), 1);
        assert_eq!(parse_pages("-4"), 1);
        assert_eq!(parse_pages("abc"), 1);
        assert_eq!(parse_pages(""), 1);
        assert_eq!(parse_pages("51"), 50);
        assert_eq!(parse_pages("99999999999999999999999"), 50);
        assert_eq!(parse_pages("12abc"), 12);
        assert_eq!(parse_pages("3.7"), 3);
    }

    #[test]
    fn test_clamp_buffer_snaps_to_step() {
        assert_eq!(clamp_buffer(20), 20);
        assert_eq!(clamp_buffer(0), 10);
        assert_eq!(clamp_buffer(-30), 10);
        assert_eq!(clamp_buffer(75), 50);
        assert_eq!(clamp_buffer(22), 20);
        assert_eq!(clamp_buffer(23), 25);
        assert_eq!(clamp_buffer(49), 50);
    }

    #[test]
    fn test_defaults() {
        let input = EstimateInput::new();
        assert_eq!(input.pages(), 5);
        assert_eq!(input.design, DesignComplexity::Medium);
        assert_eq!(input.builder, Builder::Elementor);
        assert_eq!(input.buffer(), 20);
        assert_eq!(input.features().count(), 0);
    }

    #[test]
    fn test_toggle_twice_deselects() {
        let mut input = EstimateInput::new();
        assert!(input.toggle_feature(Feature::Booking));
        assert!(input.is_feature_selected(Feature::Booking));
        assert!(!input.toggle_feature(Feature::Booking));
        assert!(!input.is_feature_selected(Feature::Booking));

        assert!(input.toggle_additional(Additional::Seo));
        assert!(!input.toggle_additional(Additional::Seo));
        assert_eq!(input.additionals().count(), 0);
    }

    #[test]
    fn test_selection_iterates_in_catalog_order() {
        let input = EstimateInput::new()
            .with_feature(Feature::Custom)
            .with_feature(Feature::Forms)
            .with_feature(Feature::Multilingual);
        let selected: Vec<_> = input.features().collect();
        assert_eq!(
            selected,
            vec![Feature::Forms, Feature::Multilingual, Feature::Custom]
        );
    }

    #[test]
    fn test_setters_clamp() {
        let input = EstimateInput::new().with_pages(51).with_buffer(5);
        assert_eq!(input.pages(), 50);
        assert_eq!(input.buffer(), 10);
    }
}
