//! Text analysis for section text.
//!
//! Tokenizers, token filters and analyzers used by the TF-IDF vectorizer.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
