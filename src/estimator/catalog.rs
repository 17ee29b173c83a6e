//! Fixed hour catalogs for the WordPress project estimator
//!
//! Every selectable option is a closed enum, so a lookup into an
//! [`EstimateConfig`] is an exhaustive index and cannot miss. Strings only
//! enter through [`FromStr`], which rejects unknown keys with
//! [`EstimateError::InvalidKey`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{BasePolicy, EstimateError};

/// Declares a catalog key enum with its string keys and display labels
macro_rules! catalog_key {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($key:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All variants, in catalog order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Key used in config files, CLI flags and URLs
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            /// Human readable label
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn index(self) -> usize {
                self as usize
            }
        }

        impl FromStr for $name {
            type Err = EstimateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($key => Ok($name::$variant),)+
                    _ => Err(EstimateError::InvalidKey {
                        kind: $kind,
                        key: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

catalog_key! {
    /// Design complexity of the site
    DesignComplexity, "design complexity" {
        Simple => ("simple", "Simple (basic design)"),
        Medium => ("medium", "Medium (standard design)"),
        Complex => ("complex", "Complex (unique design)"),
    }
}

catalog_key! {
    /// Website building method
    Builder, "builder" {
        Elementor => ("elementor", "Elementor"),
        Bricks => ("bricks", "Bricks Builder"),
        Beaver => ("beaver", "Beaver Builder"),
        Divi => ("divi", "Divi"),
        Gutenberg => ("gutenberg", "Gutenberg"),
        Custom => ("custom", "Custom code"),
    }
}

catalog_key! {
    /// Special functionality
    Feature, "feature" {
        Forms => ("forms", "Advanced Forms"),
        Ecommerce => ("ecommerce", "E-commerce (WooCommerce)"),
        Membership => ("membership", "Memberships"),
        Multilingual => ("multilingual", "Multilingual"),
        Booking => ("booking", "Bookings"),
        Custom => ("custom", "Custom"),
    }
}

catalog_key! {
    /// Additional service
    Additional, "additional service" {
        Migration => ("migration", "Content/Posts migration"),
        Seo => ("seo", "SEO"),
        Optimization => ("optimization", "Site Optimization"),
    }
}

/// Hour-cost table for one revision of the estimator
///
/// Tables are `const` data and never change at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateConfig {
    /// Base-hours policy this table was calibrated for
    pub policy: BasePolicy,
    design_hours: [f64; 3],
    builder_factor: [f64; 6],
    feature_hours: [u32; 6],
    additional_hours: [u32; 3],
}

/// Diminishing-returns revision (canonical)
pub const WEIGHTED: EstimateConfig = EstimateConfig {
    policy: BasePolicy::Weighted,
    design_hours: [4.5, 5.0, 6.1],
    builder_factor: [1.0, 1.1, 1.2, 1.25, 1.5, 2.0],
    feature_hours: [4, 20, 15, 8, 12, 18],
    additional_hours: [10, 6, 6],
};

/// Flat-rate revision
pub const FLAT_RATE: EstimateConfig = EstimateConfig {
    policy: BasePolicy::Flat,
    design_hours: [3.5, 4.5, 5.5],
    builder_factor: [1.0, 1.0, 1.2, 1.3, 1.4, 2.0],
    feature_hours: [4, 20, 15, 8, 12, 25],
    additional_hours: [10, 6, 6],
};

impl EstimateConfig {
    pub fn weighted() -> &'static EstimateConfig {
        &WEIGHTED
    }

    pub fn flat_rate() -> &'static EstimateConfig {
        &FLAT_RATE
    }

    /// The table calibrated for `policy`
    pub fn for_policy(policy: BasePolicy) -> &'static EstimateConfig {
        match policy {
            BasePolicy::Weighted => Self::weighted(),
            BasePolicy::Flat => Self::flat_rate(),
        }
    }

    pub fn design_hours(&self, design: DesignComplexity) -> f64 {
        self.design_hours[design.index()]
    }

    pub fn builder_factor(&self, builder: Builder) -> f64 {
        self.builder_factor[builder.index()]
    }

    pub fn feature_hours(&self, feature: Feature) -> u32 {
        self.feature_hours[feature.index()]
    }

    pub fn additional_hours(&self, additional: Additional) -> u32 {
        self.additional_hours[additional.index()]
    }
}
