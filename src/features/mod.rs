//! Feature derivation for README sections.
//!
//! - [`heuristics`]: hand-written features from URL, heading and content
//! - [`table`]: key-carrying feature blocks and their checked concatenation

pub mod heuristics;
pub mod table;

pub use heuristics::{FeatureDeriver, ReadmeHeuristics};
pub use table::KeyedFeatures;
