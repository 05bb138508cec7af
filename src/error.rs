//! Error types for the README section classifier.
//!
//! All fallible operations in this crate return [`Result`], whose error side is
//! the [`ClassifierError`] enum. Wrapped library errors (I/O, SQLite, CSV,
//! serialization) convert automatically through `?`.
//!
//! # Examples
//!
//! ```
//! use readme_classifier::error::{ClassifierError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ClassifierError::config("missing key 'db_filename'"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for classifier operations.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// I/O errors (config, artifacts, log and output files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (missing keys, unparsable values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// SQLite errors raised while reading the section corpus
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Model artifact errors (wrong kind, unsupported version)
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Matrix dimensions that do not fit together
    #[error("Shape error: {0}")]
    Shape(String),

    /// Feature blocks whose rows do not refer to the same sections
    #[error("Alignment error: {0}")]
    Alignment(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary serialization/deserialization errors
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with ClassifierError.
pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Config(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Artifact(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Analysis(msg.into())
    }

    /// Create a new shape error.
    pub fn shape<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Shape(msg.into())
    }

    /// Create a new alignment error.
    pub fn alignment<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Alignment(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
