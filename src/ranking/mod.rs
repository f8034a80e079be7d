//! Relevance ranking of headlines against a query.
//!
//! The query and every candidate are projected into a shared TF-IDF term
//! space ([`TfIdfVectorizer`]) and scored by [`cosine_similarity`] against
//! the query vector. [`SimilarityRanker`] ties the two together and returns
//! the best candidates by position.

pub mod ranker;
pub mod similarity;
pub mod tfidf;

pub use ranker::{DEFAULT_TOP_K, RankedIndex, SimilarityRanker};
pub use similarity::cosine_similarity;
pub use tfidf::TfIdfVectorizer;
