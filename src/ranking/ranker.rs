//! Similarity ranker: scores candidate documents against a query.
//!
//! # Examples
//!
//! ```
//! use pulse::ranking::SimilarityRanker;
//!
//! let ranker = SimilarityRanker::new().unwrap();
//! let ranked = ranker
//!     .rank(
//!         "Quantum Computing",
//!         &[
//!             "Quantum Computing breakthrough announced",
//!             "Local bakery wins award",
//!             "New quantum computing chip unveiled",
//!         ],
//!     )
//!     .unwrap();
//!
//! assert_eq!(ranked.len(), 3);
//! assert_eq!(ranked[2].index, 1);
//! assert_eq!(ranked[2].score, 0.0);
//! ```

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::error::{PulseError, Result};
use crate::ranking::similarity::cosine_similarity;
use crate::ranking::tfidf::TfIdfVectorizer;

/// Number of ranked results kept by default.
pub const DEFAULT_TOP_K: usize = 5;

/// A candidate position paired with its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedIndex {
    /// Index into the candidate list given to the ranker.
    pub index: usize,
    /// Cosine similarity to the query, in `[0.0, 1.0]`.
    pub score: f64,
}

/// Ranks candidate documents by TF-IDF cosine similarity to a query.
///
/// Every call fits a fresh vectorizer on the query plus the candidates, with
/// the query as the first document, so IDF reflects the current result set
/// only. The ranker itself holds no per-request state.
#[derive(Clone)]
pub struct SimilarityRanker {
    analyzer: Arc<dyn Analyzer>,
    top_k: usize,
}

impl SimilarityRanker {
    /// Create a ranker using the [`StandardAnalyzer`] and [`DEFAULT_TOP_K`].
    pub fn new() -> Result<Self> {
        Ok(Self::with_analyzer(Arc::new(StandardAnalyzer::new()?)))
    }

    /// Create a ranker with a custom analyzer.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            analyzer,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set how many results [`rank`](Self::rank) keeps. Zero is treated as one.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Get the configured result limit.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Score every candidate against the query, by position.
    ///
    /// # Errors
    ///
    /// [`PulseError::EmptyQuery`] if the query is blank and
    /// [`PulseError::EmptyCandidates`] if there is nothing to score.
    pub fn score<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Result<Vec<f64>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PulseError::EmptyQuery);
        }
        if candidates.is_empty() {
            return Err(PulseError::EmptyCandidates);
        }

        let mut corpus: Vec<&str> = Vec::with_capacity(candidates.len() + 1);
        corpus.push(query);
        corpus.extend(candidates.iter().map(|c| c.as_ref()));

        let mut vectorizer = TfIdfVectorizer::new(Arc::clone(&self.analyzer));
        let vectors = vectorizer.fit_transform(&corpus)?;
        debug!(
            "fitted {} documents over {} terms",
            vectorizer.document_count(),
            vectorizer.vocabulary_size()
        );

        let (query_vector, candidate_vectors) = vectors.split_at(1);
        let scores = candidate_vectors
            .iter()
            .map(|v| cosine_similarity(&query_vector[0], v).clamp(0.0, 1.0))
            .collect();

        Ok(scores)
    }

    /// Rank candidates by descending score, keeping at most `top_k`.
    ///
    /// Equal scores keep their input order.
    pub fn rank<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Result<Vec<RankedIndex>> {
        let scores = self.score(query, candidates)?;

        let mut ranked: Vec<RankedIndex> = scores
            .into_iter()
            .enumerate()
            .map(|(index, score)| RankedIndex { index, score })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.top_k);

        Ok(ranked)
    }
}

impl std::fmt::Debug for SimilarityRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityRanker")
            .field("analyzer", &self.analyzer.name())
            .field("top_k", &self.top_k)
            .finish()
    }
}
