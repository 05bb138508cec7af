//! Tokens produced by tokenizers and rewritten by filters.
//!
//! The vectorizer only reads [`Token::text`]; positions and byte offsets are
//! kept so shingles can report the span they cover.
//!
//! ```
//! use readme_classifier::analysis::token::Token;
//!
//! let token = Token::with_offsets("install", 1, 4, 11);
//! assert_eq!(token.len(), 7);
//! assert_eq!(token.end_offset - token.start_offset, token.len());
//! ```

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Index of the token in its stream.
    pub position: usize,
    /// Byte span in the analyzed text.
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Token {
    /// Token without a known source span.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Same position and span, new text.
    pub fn map_text<F: FnOnce(&str) -> String>(self, f: F) -> Self {
        Token {
            text: f(&self.text),
            ..self
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Lazily evaluated sequence of tokens flowing through an analyzer.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
