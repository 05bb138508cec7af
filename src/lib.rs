//! # readme-classifier
//!
//! Multi-label classification of GitHub README sections.
//!
//! Sections are read from a SQLite database, turned into TF-IDF plus heuristic
//! features, scored by a one-vs-rest linear model and written to CSV with one
//! joined section code per section.
//!
//! ## Modules
//!
//! - [`config`]: INI configuration
//! - [`corpus`]: read-only section extraction
//! - [`analysis`]: tokenization pipeline behind the TF-IDF vectorizer
//! - [`features`]: heuristic features and key-checked feature joins
//! - [`ml`]: vectorizer, label binarizer, linear classifier and artifact files
//! - [`pipeline`]: the classification run
//! - [`training`]: fitting the artifacts from labelled sections

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod features;
pub mod logging;
pub mod ml;
pub mod output;
pub mod pipeline;
pub mod training;

pub mod prelude {
    pub use crate::config::ClassifierConfig;
    pub use crate::error::{ClassifierError, Result};
    pub use crate::ml::ModelArtifacts;
    pub use crate::pipeline::{ClassificationPipeline, RunSummary, run};
    pub use crate::training::{TrainSummary, train};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
