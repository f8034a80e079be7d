//! # Pulse
//!
//! Technology news search: fetch recent articles for a topic or keyword and
//! rank them by TF-IDF cosine similarity of their titles to the query.
//!
//! ## Features
//!
//! - Curated trending topics or free-text queries
//! - Text analysis pipeline with English stop words
//! - TF-IDF vectorization and cosine similarity ranking
//! - Typed outcomes for empty results and upstream failures
//! - Human and JSON output

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod news;
pub mod ranking;
pub mod search;
pub mod session;

pub mod prelude {
    pub use crate::config::PulseConfig;
    pub use crate::error::{PulseError, Result};
    pub use crate::news::{
        Article, FetchOutcome, NewsApiClient, NewsRequest, NewsSource, SearchWindow,
    };
    pub use crate::ranking::{RankedIndex, SimilarityRanker};
    pub use crate::search::{Hit, SearchOutcome, SearchService};
    pub use crate::session::{Query, Selection, Session, Topic};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
