//! Combining tier deductions into a final score.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use pedscore_core::Pedigree;
use pedscore_metrics::{GraphAggregate, PedigreeStatistics};

use crate::config::{ScoringPolicy, TierWeights};
use crate::consts::BASE_SCORE;
use crate::tiers::{
    AttributeScorer, FoundationScorer, MetricDelta, RelationshipScorer, Tier, TierOutcome,
    TierScorer,
};

/// Coarse reading of a final score.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Acceptable,
    Poor,
    Failing,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            ScoreBand::Excellent
        } else if score >= 80.0 {
            ScoreBand::Good
        } else if score >= 70.0 {
            ScoreBand::Acceptable
        } else if score >= 60.0 {
            ScoreBand::Poor
        } else {
            ScoreBand::Failing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Acceptable => "acceptable",
            ScoreBand::Poor => "poor",
            ScoreBand::Failing => "failing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT - Minor issues only",
            ScoreBand::Good => "GOOD - Some relationship/attribute errors",
            ScoreBand::Acceptable => "ACCEPTABLE - Foundation mostly correct",
            ScoreBand::Poor => "POOR - Significant structural problems",
            ScoreBand::Failing => "FAILING - Major structural failures",
        }
    }
}

/// Raw deduction of a tier, its weight and the weighted contribution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TierResult {
    pub tier: Tier,
    pub raw_deduction: f64,
    pub weight: f64,
    pub weighted: f64,
}

///
/// Outcome of one golden/candidate comparison.
///
/// Built once by [ScoreReport::new]; fields are public for reading and
/// serialization.
///
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub golden_file: String,
    pub test_file: String,
    pub final_score: f64,
    pub total_deduction: f64,
    pub band: ScoreBand,
    pub foundation: TierResult,
    pub relationship: TierResult,
    pub attribute: TierResult,
    pub deltas: Vec<MetricDelta>,
    /// Left empty for manual annotation downstream.
    pub image_id: String,
}

fn weight_of(tier: Tier, weights: &TierWeights) -> f64 {
    match tier {
        Tier::Foundation => weights.foundation,
        Tier::Relationship => weights.relationship,
        Tier::Attribute => weights.attribute,
    }
}

fn tier_result(outcome: &TierOutcome, weights: &TierWeights) -> TierResult {
    let weight = weight_of(outcome.tier, weights);
    TierResult {
        tier: outcome.tier,
        raw_deduction: outcome.deduction,
        weight,
        weighted: outcome.deduction * weight,
    }
}

impl ScoreReport {
    ///
    /// Weight the three tier outcomes and clamp the final score at zero.
    ///
    /// # Arguments
    /// - golden_file: identifier of the reference graph
    /// - test_file: identifier of the candidate graph
    /// - foundation, relationship, attribute: outcomes of the three scorers
    /// - weights: tier weights
    ///
    pub fn new(
        golden_file: &str,
        test_file: &str,
        foundation: TierOutcome,
        relationship: TierOutcome,
        attribute: TierOutcome,
        weights: &TierWeights,
    ) -> Self {
        let foundation_result = tier_result(&foundation, weights);
        let relationship_result = tier_result(&relationship, weights);
        let attribute_result = tier_result(&attribute, weights);

        let total_deduction = foundation_result.weighted
            + relationship_result.weighted
            + attribute_result.weighted;
        let final_score = (BASE_SCORE - total_deduction).max(0.0);

        let deltas = foundation
            .deltas
            .into_iter()
            .chain(relationship.deltas)
            .chain(attribute.deltas)
            .collect();

        ScoreReport {
            golden_file: golden_file.to_string(),
            test_file: test_file.to_string(),
            final_score,
            total_deduction,
            band: ScoreBand::from_score(final_score),
            foundation: foundation_result,
            relationship: relationship_result,
            attribute: attribute_result,
            deltas,
            image_id: String::new(),
        }
    }

    pub fn tier(&self, tier: Tier) -> &TierResult {
        match tier {
            Tier::Foundation => &self.foundation,
            Tier::Relationship => &self.relationship,
            Tier::Attribute => &self.attribute,
        }
    }

    pub fn deltas_for(&self, tier: Tier) -> impl Iterator<Item = &MetricDelta> {
        self.deltas.iter().filter(move |d| d.tier == tier)
    }

    ///
    /// Deltas that cost something, largest deduction first.
    ///
    pub fn penalized_deltas(&self) -> Vec<&MetricDelta> {
        let mut penalized: Vec<&MetricDelta> =
            self.deltas.iter().filter(|d| d.deduction > 0.0).collect();
        penalized.sort_by(|a, b| b.deduction.total_cmp(&a.deduction));
        penalized
    }
}

///
/// Score a candidate aggregate against the golden aggregate.
///
pub fn score_labeled(
    golden_file: &str,
    test_file: &str,
    golden: &GraphAggregate,
    test: &GraphAggregate,
    policy: &ScoringPolicy,
) -> ScoreReport {
    let foundation = FoundationScorer::new(&policy.foundation).score(golden, test);
    let relationship = RelationshipScorer::new(&policy.relationship).score(golden, test);
    let attribute = AttributeScorer::new(&policy.attribute).score(golden, test);

    ScoreReport::new(
        golden_file,
        test_file,
        foundation,
        relationship,
        attribute,
        &policy.weights,
    )
}

/// [score_labeled] without file identifiers.
pub fn score_aggregates(
    golden: &GraphAggregate,
    test: &GraphAggregate,
    policy: &ScoringPolicy,
) -> ScoreReport {
    score_labeled("", "", golden, test, policy)
}

///
/// Extract both aggregates and score them. The report carries the source
/// file names when the pedigrees were read from disk.
///
pub fn compare_pedigrees(golden: &Pedigree, test: &Pedigree, policy: &ScoringPolicy) -> ScoreReport {
    score_labeled(
        &golden.identifier(),
        &test.identifier(),
        &golden.aggregate(),
        &test.aggregate(),
        policy,
    )
}

impl Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "COMPREHENSIVE SCORE BREAKDOWN")?;
        writeln!(f, "{}", "=".repeat(50))?;
        if !self.golden_file.is_empty() || !self.test_file.is_empty() {
            writeln!(f, "Golden: {}", self.golden_file)?;
            writeln!(f, "Test:   {}", self.test_file)?;
        }
        writeln!(f, "FINAL SCORE: {:.1}/100", self.final_score)?;
        writeln!(f, "Interpretation: {}", self.band.description())?;
        writeln!(f)?;
        writeln!(f, "TIER BREAKDOWN:")?;
        for tier in Tier::ALL {
            let result = self.tier(tier);
            let label = format!(
                "Tier {} ({} {:.0}%):",
                tier.number(),
                tier,
                result.weight * 100.0
            );
            writeln!(
                f,
                "   {:<30} -{:.1} pts (raw {:.2})",
                label, result.weighted, result.raw_deduction
            )?;
        }
        writeln!(f, "   {:<30} -{:.1} pts", "Total Deductions:", self.total_deduction)?;

        let penalized = self.penalized_deltas();
        if !penalized.is_empty() {
            writeln!(f)?;
            writeln!(f, "LARGEST DIFFERENCES:")?;
            for delta in penalized.iter().take(10) {
                writeln!(
                    f,
                    "   {:<12} {:<36} golden {:>4}  test {:>4}  -{:.2}",
                    delta.tier.as_str(),
                    delta.metric,
                    delta.golden,
                    delta.test,
                    delta.deduction
                )?;
            }
        }
        Ok(())
    }
}
