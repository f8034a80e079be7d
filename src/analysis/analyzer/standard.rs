//! The analyzer headlines and queries go through before ranking.
//!
//! Words of two or more characters are lowercased and English stop words
//! are dropped.
//!
//! ```
//! use pulse::analysis::analyzer::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let terms = analyzer.terms("The Future of Quantum Computing").unwrap();
//! assert_eq!(terms, vec!["future", "quantum", "computing"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Regex words, then lowercase, then the English stop list.
#[derive(Debug)]
pub struct StandardAnalyzer(PipelineAnalyzer);

impl StandardAnalyzer {
    pub fn new() -> Result<Self> {
        let pipeline = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .with_name("standard");
        Ok(StandardAnalyzer(pipeline))
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.0.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
