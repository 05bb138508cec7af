//! Token filter implementations for token transformation.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`shingle::ShingleFilter`] - Emits word n-grams
//!
//! Filters are chained by an analyzer:
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Shingles → Vectorizer
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream, allowing
/// them to modify, drop, or add tokens.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod shingle;
pub mod stop;

pub use lowercase::LowercaseFilter;
pub use shingle::ShingleFilter;
pub use stop::StopFilter;
