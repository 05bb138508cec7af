//! Machine learning components of the section classifier.
//!
//! - [`tfidf::TfIdfVectorizer`]: text → sparse TF-IDF rows
//! - [`binarizer::MultiLabelBinarizer`]: label sets ↔ indicator rows
//! - [`linear::LinearClassifier`]: one-vs-rest linear model
//! - [`artifact`]: serde-backed persistence of the three models
//!
//! # Example
//!
//! ```rust
//! use readme_classifier::ml::binarizer::MultiLabelBinarizer;
//! use readme_classifier::ml::linear::LinearClassifier;
//! use readme_classifier::ml::matrix::DenseMatrix;
//!
//! # fn main() -> readme_classifier::error::Result<()> {
//! let binarizer = MultiLabelBinarizer::with_classes(["1", "3"]);
//! let classifier = LinearClassifier::new(vec![vec![1.0], vec![-1.0]], vec![0.0, 0.0])?;
//!
//! let x = DenseMatrix::from_rows(vec![vec![2.0]], 1)?;
//! let codes = binarizer.decode_joined(&classifier.predict(&x)?)?;
//! assert_eq!(codes, vec!["1".to_string()]);
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod binarizer;
pub mod linear;
pub mod matrix;
pub mod tfidf;

pub use artifact::ModelArtifacts;
pub use binarizer::MultiLabelBinarizer;
pub use linear::{LinearClassifier, SgdParams};
pub use matrix::{CsrMatrix, DenseMatrix, IndicatorMatrix};
pub use tfidf::{TfIdfParams, TfIdfVectorizer};
