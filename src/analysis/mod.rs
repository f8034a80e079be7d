//! Text analysis for Pulse.
//!
//! Titles and queries are turned into terms by an [`Analyzer`]: a tokenizer
//! followed by a chain of token filters. The ranker uses the
//! [`StandardAnalyzer`] (word tokens, lowercase, English stop words).

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
