//! Metric extraction for pedigree graphs.
//!
//! All counts are taken over the whole node list and do not depend on the
//! order of the nodes.

use std::collections::BTreeMap;

use fxhash::{FxHashMap, FxHashSet};
use log::debug;

use pedscore_core::{DiseasePattern, Pedigree, Sex, StatusSymbol, TwinType};

use crate::models::{
    ChildrenDistribution, GraphAggregate, ParentCompleteness, PartnerBuckets, SiblingBuckets,
};

/// Trait for computing aggregate metrics of a pedigree graph.
pub trait PedigreeStatistics {
    /// Number of nodes on each generation level. Nodes without a level are left out.
    fn level_counts(&self) -> BTreeMap<u32, u32>;

    /// Number of nodes in each sex category, including zero counts.
    fn gender_counts(&self) -> BTreeMap<Sex, u32>;

    /// Number of nodes flagged as having no parents in the drawing.
    fn no_parents_count(&self) -> u32;

    /// Nodes with exactly one distinct partner, and with more than one.
    fn partner_buckets(&self) -> PartnerBuckets;

    /// Size of every node's sibling set, in node order.
    ///
    /// Two nodes are siblings when they sit on the same level and share at
    /// least one parent reference, or when a node lists the other as a
    /// sibling. Nodes without a level only pair with each other. A node is
    /// never its own sibling.
    fn sibling_counts(&self) -> Vec<usize>;

    /// Undirected partner edges, and how many of them are flagged divorced.
    ///
    /// An edge between `a` and `b` is counted once no matter how many times
    /// (or from which side) it is listed. It is divorced if any listing
    /// flags it.
    fn partnership_counts(&self) -> (u32, u32);

    /// Occurrences of every disease pattern, including zero counts.
    fn disease_counts(&self) -> BTreeMap<DiseasePattern, u32>;

    /// Occurrences of every status symbol, including zero counts.
    fn symbol_counts(&self) -> BTreeMap<StatusSymbol, u32>;

    /// Nodes in an MZ or DZ twin relationship.
    fn twin_counts(&self) -> BTreeMap<TwinType, u32>;

    /// Nodes without any parent reference.
    fn root_nodes_count(&self) -> u32;

    /// Nodes whose name no node references as a parent.
    fn leaf_nodes_count(&self) -> u32;

    /// Nodes with zero, one, and two or more parent references.
    fn parent_completeness(&self) -> ParentCompleteness;

    /// Children per referenced parent name.
    fn children_distribution(&self) -> ChildrenDistribution;

    /// Nodes with at least one sibling, and their sibling-count distribution.
    fn sibling_distribution(&self) -> (u32, SiblingBuckets) {
        let mut buckets = SiblingBuckets::default();
        let mut total = 0;
        for count in self.sibling_counts() {
            if count > 0 {
                total += 1;
            }
            buckets.add(count);
        }
        (total, buckets)
    }

    /// Compute the full [GraphAggregate].
    fn aggregate(&self) -> GraphAggregate;
}

impl PedigreeStatistics for Pedigree {
    fn level_counts(&self) -> BTreeMap<u32, u32> {
        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for level in self.nodes.iter().filter_map(|node| node.level) {
            *counts.entry(level).or_insert(0) += 1;
        }
        counts
    }

    fn gender_counts(&self) -> BTreeMap<Sex, u32> {
        let mut counts: BTreeMap<Sex, u32> = Sex::ALL.iter().map(|sex| (*sex, 0)).collect();
        for node in &self.nodes {
            *counts.entry(node.sex).or_insert(0) += 1;
        }
        counts
    }

    fn no_parents_count(&self) -> u32 {
        self.nodes.iter().filter(|node| node.no_parents).count() as u32
    }

    fn partner_buckets(&self) -> PartnerBuckets {
        let mut buckets = PartnerBuckets::default();
        for node in &self.nodes {
            match node.partner_names().len() {
                0 => {}
                1 => buckets.single += 1,
                _ => buckets.multiple += 1,
            }
        }
        buckets
    }

    fn sibling_counts(&self) -> Vec<usize> {
        let mut children_of: FxHashMap<(&str, Option<u32>), Vec<&str>> = FxHashMap::default();
        for node in &self.nodes {
            for parent in &node.parents {
                children_of
                    .entry((parent.as_str(), node.level))
                    .or_default()
                    .push(node.name.as_str());
            }
        }

        self.nodes
            .iter()
            .map(|node| {
                let mut siblings: FxHashSet<&str> = FxHashSet::default();
                for parent in &node.parents {
                    if let Some(children) = children_of.get(&(parent.as_str(), node.level)) {
                        siblings.extend(children.iter().copied());
                    }
                }
                siblings.extend(node.siblings.iter().map(String::as_str));
                siblings.remove(node.name.as_str());
                siblings.len()
            })
            .collect()
    }

    fn partnership_counts(&self) -> (u32, u32) {
        let mut edges: FxHashMap<(&str, &str), bool> = FxHashMap::default();

        for node in &self.nodes {
            let a = node.name.as_str();
            for partner in &node.partners {
                let b = partner.name.as_str();
                if a.is_empty() || b.is_empty() || a == b {
                    continue;
                }
                let key = if a < b { (a, b) } else { (b, a) };
                let divorced = edges.entry(key).or_insert(false);
                *divorced |= partner.divorced;
            }
        }

        let divorces = edges.values().filter(|divorced| **divorced).count();
        (edges.len() as u32, divorces as u32)
    }

    fn disease_counts(&self) -> BTreeMap<DiseasePattern, u32> {
        let mut counts: BTreeMap<DiseasePattern, u32> =
            DiseasePattern::ALL.iter().map(|p| (*p, 0)).collect();
        for pattern in self.nodes.iter().flat_map(|node| node.diseases.iter()) {
            *counts.entry(*pattern).or_insert(0) += 1;
        }
        counts
    }

    fn symbol_counts(&self) -> BTreeMap<StatusSymbol, u32> {
        let mut counts: BTreeMap<StatusSymbol, u32> =
            StatusSymbol::ALL.iter().map(|s| (*s, 0)).collect();
        for symbol in self.nodes.iter().flat_map(|node| node.symbols.iter()) {
            *counts.entry(*symbol).or_insert(0) += 1;
        }
        counts
    }

    fn twin_counts(&self) -> BTreeMap<TwinType, u32> {
        let mut counts: BTreeMap<TwinType, u32> =
            TwinType::ALL.iter().map(|t| (*t, 0)).collect();
        for twin in self.nodes.iter().filter_map(|node| node.twin.as_ref()) {
            *counts.entry(twin.kind).or_insert(0) += 1;
        }
        counts
    }

    fn root_nodes_count(&self) -> u32 {
        self.nodes.iter().filter(|node| node.parents.is_empty()).count() as u32
    }

    fn leaf_nodes_count(&self) -> u32 {
        let parents: FxHashSet<&str> = self
            .nodes
            .iter()
            .flat_map(|node| node.parents.iter().map(String::as_str))
            .collect();
        self.nodes
            .iter()
            .filter(|node| !parents.contains(node.name.as_str()))
            .count() as u32
    }

    fn parent_completeness(&self) -> ParentCompleteness {
        let mut completeness = ParentCompleteness::default();
        for node in &self.nodes {
            match node.parents.len() {
                0 => completeness.zero += 1,
                1 => completeness.one += 1,
                _ => completeness.two += 1,
            }
        }
        completeness
    }

    fn children_distribution(&self) -> ChildrenDistribution {
        let mut children_of: FxHashMap<&str, u32> = FxHashMap::default();
        for parent in self.nodes.iter().flat_map(|node| node.parents.iter()) {
            *children_of.entry(parent.as_str()).or_insert(0) += 1;
        }

        let mut distribution = ChildrenDistribution::default();
        for children in children_of.into_values() {
            distribution.add(children);
        }
        distribution
    }

    fn aggregate(&self) -> GraphAggregate {
        let (sibling_total, sibling_buckets) = self.sibling_distribution();
        let (partnerships_count, divorces_count) = self.partnership_counts();

        let aggregate = GraphAggregate {
            total_nodes: self.len() as u32,
            top_level_count: self.nodes.iter().filter(|node| node.top_level).count() as u32,
            root_nodes_count: self.root_nodes_count(),
            leaf_nodes_count: self.leaf_nodes_count(),
            parent_completeness: self.parent_completeness(),
            children_distribution: self.children_distribution(),
            level_counts: self.level_counts(),
            gender_counts: self.gender_counts(),
            no_parents_count: self.no_parents_count(),
            partner_buckets: self.partner_buckets(),
            sibling_total,
            sibling_buckets,
            partnerships_count,
            divorces_count,
            disease_counts: self.disease_counts(),
            symbol_counts: self.symbol_counts(),
            twin_counts: self.twin_counts(),
        };

        debug!(
            "Aggregated {} nodes over {} generations",
            aggregate.total_nodes,
            aggregate.generations()
        );
        aggregate
    }
}
