//! Case folding, so "Quantum" in a headline matches "quantum" in a query.
//!
//! ```
//! use pulse::analysis::token_filter::Filter;
//! use pulse::analysis::token_filter::lowercase::LowercaseFilter;
//! use pulse::analysis::token::Token;
//!
//! let folded: Vec<_> = LowercaseFilter::new()
//!     .filter(Box::new(vec![Token::new("EV", 0), Token::new("Battery", 1)].into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(folded, vec!["ev", "battery"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Lowercases every token that is not marked stopped.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

fn fold(token: Token) -> Token {
    if token.is_stopped() || !token.text.chars().any(char::is_uppercase) {
        return token;
    }
    let folded = token.text.to_lowercase();
    token.with_text(folded)
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(fold)))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
