//! The search pipeline: fetch articles for a query and rank them.
//!
//! [`SearchService::search`] never fails. Every way a search can end is a
//! [`SearchOutcome`] the caller renders.

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::PulseConfig;
use crate::news::article::{Article, FetchOutcome, NewsRequest, SORT_BY_RELEVANCY};
use crate::news::window::{DEFAULT_FLOOR_YEAR, DEFAULT_WINDOW_DAYS, SearchWindow};
use crate::news::NewsSource;
use crate::ranking::SimilarityRanker;
use crate::session::Query;

/// A ranked article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    pub article: Article,
    /// Cosine similarity to the query, in `[0.0, 1.0]`.
    pub score: f64,
}

impl Hit {
    /// The score as a percentage.
    pub fn match_percent(&self) -> f64 {
        self.score * 100.0
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Ranked articles, best first.
    Results {
        query: Query,
        window: SearchWindow,
        hits: Vec<Hit>,
    },
    /// The source had nothing for the query.
    NoResults {
        query: Query,
        window: SearchWindow,
        days: u32,
    },
    /// The source refused the request.
    UpstreamError { message: String },
    /// The source could not be reached or answered garbage.
    ConnectionError { message: String },
}

impl SearchOutcome {
    /// Text shown instead of results, if there are none.
    pub fn notice(&self) -> Option<String> {
        match self {
            SearchOutcome::Results { .. } => None,
            SearchOutcome::NoResults { query, days, .. } => Some(format!(
                "No news found for '{query}' in the last {days} days."
            )),
            SearchOutcome::UpstreamError { message } => Some(format!("API Error: {message}")),
            SearchOutcome::ConnectionError { message } => {
                Some(format!("Connection error: {message}"))
            }
        }
    }

    /// The ranked hits; empty unless the search produced results.
    pub fn hits(&self) -> &[Hit] {
        match self {
            SearchOutcome::Results { hits, .. } => hits,
            _ => &[],
        }
    }
}

/// Runs searches against a [`NewsSource`].
#[derive(Debug)]
pub struct SearchService<S> {
    source: S,
    ranker: SimilarityRanker,
    window_days: u32,
    floor_year: i32,
    language: String,
    sort_by: String,
}

impl<S: NewsSource> SearchService<S> {
    /// Create a service with the default window and language.
    pub fn new(source: S, ranker: SimilarityRanker) -> Self {
        SearchService {
            source,
            ranker,
            window_days: DEFAULT_WINDOW_DAYS,
            floor_year: DEFAULT_FLOOR_YEAR,
            language: "en".to_string(),
            sort_by: SORT_BY_RELEVANCY.to_string(),
        }
    }

    /// Create a service configured from `config`.
    pub fn from_config(source: S, ranker: SimilarityRanker, config: &PulseConfig) -> Self {
        Self::new(source, ranker.with_top_k(config.top_k))
            .with_window(config.window_days, config.floor_year)
            .with_language(config.language.clone())
            .with_sort_by(config.sort_by.clone())
    }

    /// Set the look-back window and floor year.
    pub fn with_window(mut self, days: u32, floor_year: i32) -> Self {
        self.window_days = days;
        self.floor_year = floor_year;
        self
    }

    /// Set the language filter.
    pub fn with_language<L: Into<String>>(mut self, language: L) -> Self {
        self.language = language.into();
        self
    }

    /// Set the upstream sort order.
    pub fn with_sort_by<T: Into<String>>(mut self, sort_by: T) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// The window a search started now would use.
    pub fn window(&self) -> SearchWindow {
        SearchWindow::current(self.window_days, self.floor_year)
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Search the current window.
    pub async fn search(&self, query: &Query) -> SearchOutcome {
        self.search_within(query, self.window()).await
    }

    /// Search a given window.
    pub async fn search_within(&self, query: &Query, window: SearchWindow) -> SearchOutcome {
        info!("Searching for '{query}' since {}", window.start);

        let request = NewsRequest::new(query.as_str(), window.start)
            .with_language(self.language.clone())
            .with_sort_by(self.sort_by.clone());

        let articles = match self.source.fetch(&request).await {
            Ok(FetchOutcome::Articles(articles)) => articles,
            Ok(FetchOutcome::NoResults) => {
                info!("No articles for '{query}'");
                return SearchOutcome::NoResults {
                    query: query.clone(),
                    window,
                    days: self.window_days,
                };
            }
            Ok(FetchOutcome::UpstreamError { code, message }) => {
                warn!(
                    "News API rejected the request ({}): {message}",
                    code.as_deref().unwrap_or("no code")
                );
                return SearchOutcome::UpstreamError { message };
            }
            Err(e) => {
                warn!("Fetching articles failed: {e}");
                return SearchOutcome::ConnectionError {
                    message: e.to_string(),
                };
            }
        };

        debug!("Ranking {} candidate articles", articles.len());
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        let ranked = match self.ranker.rank(query.as_str(), &titles) {
            Ok(ranked) => ranked,
            Err(e) => {
                warn!("Ranking failed: {e}");
                return SearchOutcome::ConnectionError {
                    message: e.to_string(),
                };
            }
        };

        let hits: Vec<Hit> = ranked
            .into_iter()
            .filter_map(|r| {
                articles.get(r.index).map(|article| Hit {
                    article: article.clone(),
                    score: r.score,
                })
            })
            .collect();
        info!("Returning {} of {} articles", hits.len(), articles.len());

        SearchOutcome::Results {
            query: query.clone(),
            window,
            hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query(text: &str) -> Query {
        Query::parse(text).unwrap()
    }

    fn window() -> SearchWindow {
        SearchWindow::ending_on(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), 30, 2026)
    }

    #[test]
    fn test_notices() {
        let no_results = SearchOutcome::NoResults {
            query: query("fusion"),
            window: window(),
            days: 30,
        };
        assert_eq!(
            no_results.notice().unwrap(),
            "No news found for 'fusion' in the last 30 days."
        );
        assert!(no_results.hits().is_empty());

        let upstream = SearchOutcome::UpstreamError {
            message: "rate limited".to_string(),
        };
        assert_eq!(upstream.notice().unwrap(), "API Error: rate limited");

        let connection = SearchOutcome::ConnectionError {
            message: "dns failure".to_string(),
        };
        assert_eq!(connection.notice().unwrap(), "Connection error: dns failure");
    }

    #[test]
    fn test_results_have_no_notice() {
        let results = SearchOutcome::Results {
            query: query("fusion"),
            window: window(),
            hits: vec![Hit {
                article: Article::new("Fusion record", None, "https://example.com"),
                score: 0.5,
            }],
        };
        assert!(results.notice().is_none());
        assert_eq!(results.hits().len(), 1);
        assert_eq!(results.hits()[0].match_percent(), 50.0);
    }

    #[test]
    fn test_outcome_json_tag() {
        let outcome = SearchOutcome::UpstreamError {
            message: "bad key".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "upstream_error");
        assert_eq!(json["message"], "bad key");
    }
}
