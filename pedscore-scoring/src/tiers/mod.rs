//! Per-tier deduction scorers.
//!
//! Each scorer compares the golden and the candidate [GraphAggregate] on one
//! family of metrics and returns the raw (unweighted) deduction along with
//! one [MetricDelta] per metric it looked at, including metrics that match.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use pedscore_metrics::GraphAggregate;

pub mod attribute;
pub mod foundation;
pub mod relationship;

pub use attribute::AttributeScorer;
pub use foundation::{FoundationScorer, generation_weight};
pub use relationship::RelationshipScorer;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Foundation,
    Relationship,
    Attribute,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Foundation, Tier::Relationship, Tier::Attribute];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Foundation => "foundation",
            Tier::Relationship => "relationship",
            Tier::Attribute => "attribute",
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Tier::Foundation => 1,
            Tier::Relationship => 2,
            Tier::Attribute => 3,
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One compared metric: both counts, their distance and what it cost.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MetricDelta {
    pub tier: Tier,
    pub metric: String,
    pub golden: u32,
    pub test: u32,
    pub difference: u32,
    pub deduction: f64,
}

/// Raw deduction of one tier plus the itemized deltas that make it up.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TierOutcome {
    pub tier: Tier,
    pub deduction: f64,
    pub deltas: Vec<MetricDelta>,
}

impl TierOutcome {
    pub fn new(tier: Tier) -> Self {
        TierOutcome {
            tier,
            deduction: 0.0,
            deltas: Vec::new(),
        }
    }

    ///
    /// Record a metric whose deduction is `penalty × |golden − test|`.
    ///
    pub fn add_scaled(&mut self, metric: impl Into<String>, golden: u32, test: u32, penalty: f64) {
        let difference = golden.abs_diff(test);
        self.add(metric, golden, test, penalty * difference as f64);
    }

    ///
    /// Record a metric with an already computed deduction.
    ///
    pub fn add(&mut self, metric: impl Into<String>, golden: u32, test: u32, deduction: f64) {
        self.deduction += deduction;
        self.deltas.push(MetricDelta {
            tier: self.tier,
            metric: metric.into(),
            golden,
            test,
            difference: golden.abs_diff(test),
            deduction,
        });
    }
}

/// A scorer for one tier of metrics.
pub trait TierScorer {
    fn tier(&self) -> Tier;

    /// Compare the two aggregates. Never fails and never returns a negative deduction.
    fn score(&self, golden: &GraphAggregate, test: &GraphAggregate) -> TierOutcome;
}
