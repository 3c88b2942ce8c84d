use std::collections::BTreeSet;

use pedscore_core::Sex;
use pedscore_metrics::GraphAggregate;

use crate::config::{FoundationPenalties, GenderPenaltyMode};
use crate::tiers::{Tier, TierOutcome, TierScorer};

///
/// Normalized weight of a generation level.
///
/// The raw weight `1 / decay^level` favours the upper generations; it is
/// divided by the sum of raw weights over `0..=max_level` so the weights of a
/// pedigree with `max_level + 1` generations add up to one.
///
/// # Arguments
/// - level: the level to weigh
/// - max_level: deepest level present in either compared graph
/// - decay: base of the exponential decay, must be positive
///
pub fn generation_weight(level: u32, max_level: u32, decay: f64) -> f64 {
    let ratio = 1.0 / decay;
    let raw = ratio.powf(level as f64);

    // geometric series: sum of ratio^l for l in 0..=max_level
    let terms = max_level as f64 + 1.0;
    let total = if (ratio - 1.0).abs() < f64::EPSILON {
        terms
    } else {
        (1.0 - ratio.powf(terms)) / (1.0 - ratio)
    };

    raw / total
}

/// Tier 1: generation structure and core people.
pub struct FoundationScorer<'a> {
    penalties: &'a FoundationPenalties,
}

impl<'a> FoundationScorer<'a> {
    pub fn new(penalties: &'a FoundationPenalties) -> Self {
        FoundationScorer { penalties }
    }

    ///
    /// Flat deduction for a difference in generation count.
    ///
    pub fn generation_deduction(&self, difference: u32) -> f64 {
        match difference {
            0 => 0.0,
            1 => self.penalties.generation_off_by_one,
            _ => self.penalties.generation_off_by_many,
        }
    }

    fn gender_deduction(&self, penalty: f64, difference: u32) -> f64 {
        match self.penalties.gender_mode {
            GenderPenaltyMode::Magnitude => penalty * difference as f64,
            GenderPenaltyMode::PerCategory if difference > 0 => penalty,
            GenderPenaltyMode::PerCategory => 0.0,
        }
    }
}

impl TierScorer for FoundationScorer<'_> {
    fn tier(&self) -> Tier {
        Tier::Foundation
    }

    fn score(&self, golden: &GraphAggregate, test: &GraphAggregate) -> TierOutcome {
        let mut outcome = TierOutcome::new(self.tier());

        let (golden_generations, test_generations) = (golden.generations(), test.generations());
        outcome.add(
            "generations",
            golden_generations,
            test_generations,
            self.generation_deduction(golden_generations.abs_diff(test_generations)),
        );

        let levels: BTreeSet<u32> = golden
            .level_counts
            .keys()
            .chain(test.level_counts.keys())
            .copied()
            .collect();

        if let Some(&max_level) = levels.last() {
            for level in levels {
                let (g, t) = (golden.level(level), test.level(level));
                let weight = generation_weight(level, max_level, self.penalties.level_decay);
                let deduction = g.abs_diff(t) as f64 * weight * self.penalties.level_scale;
                outcome.add(format!("level.{}", level), g, t, deduction);
            }
        }

        for sex in [Sex::Male, Sex::Female] {
            let (g, t) = (golden.gender(sex), test.gender(sex));
            let deduction = self.gender_deduction(self.penalties.core_people, g.abs_diff(t));
            outcome.add(sex.as_str(), g, t, deduction);
        }

        let (g, t) = (golden.gender(Sex::Miscarriage), test.gender(Sex::Miscarriage));
        let deduction = self.gender_deduction(self.penalties.miscarriage, g.abs_diff(t));
        outcome.add(Sex::Miscarriage.as_str(), g, t, deduction);

        outcome
    }
}
