use std::collections::BTreeSet;

use pedscore_core::{DiseasePattern, StatusSymbol, TwinType};
use pedscore_metrics::GraphAggregate;

use crate::config::AttributePenalties;
use crate::tiers::{Tier, TierOutcome, TierScorer};

/// Tier 3: disease shading, status symbols and twins.
pub struct AttributeScorer<'a> {
    penalties: &'a AttributePenalties,
}

impl<'a> AttributeScorer<'a> {
    pub fn new(penalties: &'a AttributePenalties) -> Self {
        AttributeScorer { penalties }
    }
}

impl TierScorer for AttributeScorer<'_> {
    fn tier(&self) -> Tier {
        Tier::Attribute
    }

    fn score(&self, golden: &GraphAggregate, test: &GraphAggregate) -> TierOutcome {
        let p = self.penalties;
        let mut outcome = TierOutcome::new(self.tier());

        for pattern in DiseasePattern::ALL {
            outcome.add_scaled(
                format!("disease.{}", pattern),
                golden.disease(pattern),
                test.disease(pattern),
                p.disease,
            );
        }

        let scored: BTreeSet<StatusSymbol> = p.scored_symbols.iter().copied().collect();
        for symbol in scored {
            outcome.add_scaled(
                format!("symbol.{}", symbol),
                golden.symbol(symbol),
                test.symbol(symbol),
                p.symbol,
            );
        }

        for kind in TwinType::ALL {
            outcome.add_scaled(
                format!("twin.{}", kind),
                golden.twin(kind),
                test.twin(kind),
                p.twin,
            );
        }

        outcome
    }
}
