//! Core types for pedigree comparison.
//!
//! This crate owns the canonical node model and the normalizer that turns
//! the accepted raw JSON layouts into an ordered list of [`PedigreeNode`]s:
//!
//! - `{ "original_json": { "json": [...] } }`
//! - `{ "updated_json": { "json": [...] } }`
//! - `{ "json": [...] }`
//!
//! # Example
//!
//! ```no_run
//! use pedscore_core::models::Pedigree;
//!
//! let pedigree = Pedigree::try_from("1_golden.json").unwrap();
//! println!("{}", pedigree);
//! ```

pub mod errors;
pub mod models;
pub mod normalize;
pub mod utils;

// re-exports
pub use errors::{PedigreeError, Result};
pub use models::{DiseasePattern, Partner, Pedigree, PedigreeNode, Sex, StatusSymbol, Twin, TwinType};
