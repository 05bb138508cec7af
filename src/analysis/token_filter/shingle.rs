//! Word n-gram (shingle) filter.
//!
//! Emits every contiguous run of `min_size..=max_size` tokens joined by a
//! single space. With `min_size == 1` the original unigrams are part of the
//! output. All n-grams of one size are emitted before the next size.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{ClassifierError, Result};

/// A filter producing word n-grams.
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    min_size: usize,
    max_size: usize,
}

impl ShingleFilter {
    /// Create a shingle filter for n-gram sizes `min_size..=max_size`.
    pub fn new(min_size: usize, max_size: usize) -> Result<Self> {
        if min_size == 0 || min_size > max_size {
            return Err(ClassifierError::analysis(format!(
                "Invalid n-gram range ({min_size}, {max_size})"
            )));
        }
        Ok(ShingleFilter { min_size, max_size })
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let source: Vec<Token> = tokens.collect();
        let mut output = Vec::new();
        let mut position = 0;

        for n in self.min_size..=self.max_size {
            if n > source.len() {
                break;
            }
            for window in source.windows(n) {
                let text = window
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let start = window[0].start_offset;
                let end = window[n - 1].end_offset;
                output.push(Token::with_offsets(text, position, start, end));
                position += 1;
            }
        }

        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}
