use pedscore_metrics::{GraphAggregate, SiblingBuckets};

use crate::config::RelationshipPenalties;
use crate::tiers::{Tier, TierOutcome, TierScorer};

/// Tier 2: parent flags, partners and siblings.
pub struct RelationshipScorer<'a> {
    penalties: &'a RelationshipPenalties,
}

impl<'a> RelationshipScorer<'a> {
    pub fn new(penalties: &'a RelationshipPenalties) -> Self {
        RelationshipScorer { penalties }
    }
}

impl TierScorer for RelationshipScorer<'_> {
    fn tier(&self) -> Tier {
        Tier::Relationship
    }

    fn score(&self, golden: &GraphAggregate, test: &GraphAggregate) -> TierOutcome {
        let p = self.penalties;
        let mut outcome = TierOutcome::new(self.tier());

        outcome.add_scaled("no_parents", golden.no_parents_count, test.no_parents_count, p.no_parents);

        outcome.add_scaled(
            "partners.single",
            golden.partner_buckets.single,
            test.partner_buckets.single,
            p.partner_bucket,
        );
        outcome.add_scaled(
            "partners.multiple",
            golden.partner_buckets.multiple,
            test.partner_buckets.multiple,
            p.partner_bucket,
        );
        outcome.add_scaled(
            "partnerships",
            golden.partnerships_count,
            test.partnerships_count,
            p.partnership,
        );
        outcome.add_scaled("divorces", golden.divorces_count, test.divorces_count, p.divorce);

        outcome.add_scaled("siblings.total", golden.sibling_total, test.sibling_total, p.sibling_total);
        let buckets = golden
            .sibling_buckets
            .as_array()
            .into_iter()
            .zip(test.sibling_buckets.as_array())
            .zip(SiblingBuckets::LABELS);
        for ((g, t), label) in buckets {
            outcome.add_scaled(format!("siblings.{}", label), g, t, p.sibling_bucket);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use pedscore_metrics::PartnerBuckets;

    fn deduction_of(outcome: &TierOutcome, prefix: &str) -> f64 {
        outcome
            .deltas
            .iter()
            .filter(|d| d.metric.starts_with(prefix))
            .map(|d| d.deduction)
            .sum()
    }

    #[rstest]
    fn test_partnerships_and_divorces() {
        let penalties = RelationshipPenalties::default();
        let scorer = RelationshipScorer::new(&penalties);

        let golden = GraphAggregate {
            partnerships_count: 8,
            divorces_count: 2,
            ..Default::default()
        };
        let test = GraphAggregate {
            partnerships_count: 6,
            divorces_count: 3,
            ..Default::default()
        };

        let outcome = scorer.score(&golden, &test);
        assert_eq!(
            deduction_of(&outcome, "partnerships") + deduction_of(&outcome, "divorces"),
            5.0
        );
        assert_eq!(outcome.deduction, 5.0);
    }

    #[rstest]
    fn test_sibling_distribution() {
        let penalties = RelationshipPenalties::default();
        let scorer = RelationshipScorer::new(&penalties);

        let golden = GraphAggregate {
            sibling_total: 22,
            sibling_buckets: SiblingBuckets {
                one: 10,
                two: 8,
                three: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let test = GraphAggregate {
            sibling_total: 18,
            sibling_buckets: SiblingBuckets {
                one: 8,
                two: 6,
                three: 4,
                ..Default::default()
            },
            ..Default::default()
        };

        let outcome = scorer.score(&golden, &test);
        assert_eq!(deduction_of(&outcome, "siblings."), 8.0);
        assert_eq!(outcome.deduction, 8.0);
    }

    #[rstest]
    fn test_parent_flags_and_partner_buckets() {
        let penalties = RelationshipPenalties::default();
        let scorer = RelationshipScorer::new(&penalties);

        let golden = GraphAggregate {
            no_parents_count: 4,
            partner_buckets: PartnerBuckets {
                single: 6,
                multiple: 1,
            },
            ..Default::default()
        };
        let test = GraphAggregate {
            no_parents_count: 3,
            partner_buckets: PartnerBuckets {
                single: 4,
                multiple: 2,
            },
            ..Default::default()
        };

        let outcome = scorer.score(&golden, &test);
        assert_eq!(deduction_of(&outcome, "no_parents"), 4.0);
        assert_eq!(deduction_of(&outcome, "partners."), 6.0);
        assert_eq!(outcome.deduction, 10.0);
    }

    #[rstest]
    fn test_every_metric_is_itemized() {
        let penalties = RelationshipPenalties::default();
        let scorer = RelationshipScorer::new(&penalties);
        let outcome = scorer.score(&GraphAggregate::default(), &GraphAggregate::default());

        let metrics: Vec<&str> = outcome.deltas.iter().map(|d| d.metric.as_str()).collect();
        assert_eq!(
            metrics,
            vec![
                "no_parents",
                "partners.single",
                "partners.multiple",
                "partnerships",
                "divorces",
                "siblings.total",
                "siblings.1",
                "siblings.2",
                "siblings.3",
                "siblings.4",
                "siblings.5+",
            ]
        );
        assert_eq!(outcome.deduction, 0.0);
    }
}
