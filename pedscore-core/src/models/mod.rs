pub mod attributes;
pub mod node;
pub mod pedigree;

// re-export for cleaner imports
pub use self::attributes::{DiseasePattern, StatusSymbol};
pub use self::node::{Partner, PedigreeNode, Sex, Twin, TwinType};
pub use self::pedigree::Pedigree;
