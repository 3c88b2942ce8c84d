//! Aggregate metrics for pedigree graphs.
//!
//! This crate turns a [`Pedigree`](pedscore_core::Pedigree) into a
//! [`GraphAggregate`]: counts and distributions that describe the shape of
//! the family tree without referring to any individual node:
//!
//! - nodes per generation level and the generation count
//! - sex distribution
//! - partner, partnership, divorce and sibling distributions
//! - disease pattern, status symbol and twin counts
//!
//! # Example
//!
//! ```no_run
//! use pedscore_core::Pedigree;
//! use pedscore_metrics::PedigreeStatistics;
//!
//! let pedigree = Pedigree::try_from("1_golden.json").unwrap();
//! let aggregate = pedigree.aggregate();
//! println!("{} generations", aggregate.generations());
//! ```

pub mod models;
pub mod statistics;

// re-exports
pub use models::{
    ChildrenDistribution, GraphAggregate, ParentCompleteness, PartnerBuckets, SiblingBuckets,
};
pub use statistics::PedigreeStatistics;
