use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pedscore_core::{DiseasePattern, Sex, StatusSymbol, TwinType};

/// Nodes with exactly one partner versus more than one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartnerBuckets {
    pub single: u32,
    pub multiple: u32,
}

///
/// Nodes grouped by how many siblings they have. The last bucket collects
/// every node with five or more.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiblingBuckets {
    pub one: u32,
    pub two: u32,
    pub three: u32,
    pub four: u32,
    pub five_or_more: u32,
}

impl SiblingBuckets {
    pub const LABELS: [&'static str; 5] = ["1", "2", "3", "4", "5+"];

    /// Count one node with `siblings` siblings. Zero siblings goes nowhere.
    pub fn add(&mut self, siblings: usize) {
        match siblings {
            0 => {}
            1 => self.one += 1,
            2 => self.two += 1,
            3 => self.three += 1,
            4 => self.four += 1,
            _ => self.five_or_more += 1,
        }
    }

    pub fn as_array(&self) -> [u32; 5] {
        [self.one, self.two, self.three, self.four, self.five_or_more]
    }
}

/// Nodes by how many parent references they carry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParentCompleteness {
    pub zero: u32,
    pub one: u32,
    /// Two or more.
    pub two: u32,
}

///
/// Number of children listed under each referenced parent. Only the integer
/// sums are stored; [ChildrenDistribution::mean] derives the average.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildrenDistribution {
    pub parents: u32,
    pub min: u32,
    pub max: u32,
    pub total: u32,
}

impl ChildrenDistribution {
    pub fn add(&mut self, children: u32) {
        if self.parents == 0 {
            self.min = children;
            self.max = children;
        } else {
            self.min = self.min.min(children);
            self.max = self.max.max(children);
        }
        self.parents += 1;
        self.total += children;
    }

    pub fn mean(&self) -> f64 {
        if self.parents == 0 {
            0.0
        } else {
            self.total as f64 / self.parents as f64
        }
    }
}

///
/// Summary of one pedigree graph. Every field is a pure function of the
/// node list and is independent of node order.
///
/// Fixed categories (sex, disease, symbol, twin) always carry every key,
/// with zero for categories that never occur.
///
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphAggregate {
    pub total_nodes: u32,
    pub top_level_count: u32,
    /// Nodes without any parent reference.
    pub root_nodes_count: u32,
    /// Nodes nobody references as a parent.
    pub leaf_nodes_count: u32,
    pub parent_completeness: ParentCompleteness,
    pub children_distribution: ChildrenDistribution,
    pub level_counts: BTreeMap<u32, u32>,
    pub gender_counts: BTreeMap<Sex, u32>,
    pub no_parents_count: u32,
    pub partner_buckets: PartnerBuckets,
    pub sibling_total: u32,
    pub sibling_buckets: SiblingBuckets,
    pub partnerships_count: u32,
    pub divorces_count: u32,
    pub disease_counts: BTreeMap<DiseasePattern, u32>,
    pub symbol_counts: BTreeMap<StatusSymbol, u32>,
    pub twin_counts: BTreeMap<TwinType, u32>,
}

impl GraphAggregate {
    ///
    /// Highest level with at least one node, `None` when no node has a level.
    ///
    pub fn max_level(&self) -> Option<u32> {
        self.level_counts.keys().next_back().copied()
    }

    ///
    /// Number of generations, `max_level + 1`, or zero for a graph without levels.
    /// Saturates at `u32::MAX` for hand-built aggregates.
    ///
    pub fn generations(&self) -> u32 {
        self.max_level().map_or(0, |level| level.saturating_add(1))
    }

    pub fn level(&self, level: u32) -> u32 {
        self.level_counts.get(&level).copied().unwrap_or(0)
    }

    pub fn gender(&self, sex: Sex) -> u32 {
        self.gender_counts.get(&sex).copied().unwrap_or(0)
    }

    pub fn disease(&self, pattern: DiseasePattern) -> u32 {
        self.disease_counts.get(&pattern).copied().unwrap_or(0)
    }

    pub fn symbol(&self, symbol: StatusSymbol) -> u32 {
        self.symbol_counts.get(&symbol).copied().unwrap_or(0)
    }

    pub fn twin(&self, kind: TwinType) -> u32 {
        self.twin_counts.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(0, [0, 0, 0, 0, 0])]
    #[case(1, [1, 0, 0, 0, 0])]
    #[case(4, [0, 0, 0, 1, 0])]
    #[case(5, [0, 0, 0, 0, 1])]
    #[case(12, [0, 0, 0, 0, 1])]
    fn test_sibling_bucket_thresholds(#[case] siblings: usize, #[case] expected: [u32; 5]) {
        let mut buckets = SiblingBuckets::default();
        buckets.add(siblings);
        assert_eq!(buckets.as_array(), expected);
    }

    #[rstest]
    fn test_generations_follow_max_level() {
        let mut aggregate = GraphAggregate::default();
        assert_eq!(aggregate.generations(), 0);

        aggregate.level_counts.insert(0, 2);
        aggregate.level_counts.insert(3, 1);
        assert_eq!(aggregate.max_level(), Some(3));
        assert_eq!(aggregate.generations(), 4);
        assert_eq!(aggregate.level(1), 0);
    }

    #[rstest]
    fn test_generations_saturate_at_the_deepest_level() {
        let mut aggregate = GraphAggregate::default();
        aggregate.level_counts.insert(u32::MAX, 1);
        assert_eq!(aggregate.generations(), u32::MAX);
    }

    #[rstest]
    fn test_children_distribution() {
        let mut children = ChildrenDistribution::default();
        assert_eq!(children.mean(), 0.0);

        for count in [3, 1, 2] {
            children.add(count);
        }
        assert_eq!(
            children,
            ChildrenDistribution {
                parents: 3,
                min: 1,
                max: 3,
                total: 6
            }
        );
        assert_eq!(children.mean(), 2.0);
    }
}
