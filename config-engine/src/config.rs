//! Validator configuration
//!
//! The rule table itself is fixed; these knobs only settle the conventions
//! that depend on how the downstream solver interprets its input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Whether `(a, b)` and `(b, a)` name the same two-site pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PairOrdering {
    /// `(a, b)` and `(b, a)` are distinct pairs; only exact repeats collide
    Ordered,
    /// `(a, b)` and `(b, a)` are the same pair
    #[default]
    Unordered,
}

impl PairOrdering {
    /// Canonical key used for duplicate detection.
    pub fn key(self, a: i128, b: i128) -> (i128, i128) {
        match self {
            PairOrdering::Ordered => (a, b),
            PairOrdering::Unordered => (a.min(b), a.max(b)),
        }
    }
}

impl FromStr for PairOrdering {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ordered" => Ok(PairOrdering::Ordered),
            "unordered" => Ok(PairOrdering::Unordered),
            _ => Err(ConfigError::UnknownOption(format!(
                "Unknown pair ordering: {s}. Valid options: ordered, unordered"
            ))),
        }
    }
}

impl fmt::Display for PairOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairOrdering::Ordered => f.write_str("ordered"),
            PairOrdering::Unordered => f.write_str("unordered"),
        }
    }
}

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidatorConfig {
    /// How duplicate two-site index pairs are detected
    pub pair_ordering: PairOrdering,

    /// Reject a non-positive time step `tau`. Off by default: any numeric
    /// `tau` is accepted.
    pub require_positive_tau: bool,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pair_ordering(mut self, pair_ordering: PairOrdering) -> Self {
        self.pair_ordering = pair_ordering;
        self
    }

    #[must_use]
    pub fn with_require_positive_tau(mut self, require: bool) -> Self {
        self.require_positive_tau = require;
        self
    }
}
