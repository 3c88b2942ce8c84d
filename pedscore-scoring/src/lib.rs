pub mod batch;
pub mod config;
pub mod consts;
pub mod export;
pub mod report;
pub mod tiers;

// re-exports
pub use batch::*;
pub use config::*;
pub use export::*;
pub use report::*;
pub use tiers::*;
