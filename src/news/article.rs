//! Request and response types for the article search API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sort order requested from the API.
pub const SORT_BY_RELEVANCY: &str = "relevancy";

/// Parameters of one article search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsRequest {
    /// Free-text query.
    pub query: String,
    /// Oldest publication date to include.
    pub from: NaiveDate,
    /// Upstream sort order.
    pub sort_by: String,
    /// Two-letter language filter.
    pub language: String,
}

impl NewsRequest {
    /// Create a request sorted by relevancy, in English.
    pub fn new<S: Into<String>>(query: S, from: NaiveDate) -> Self {
        Self {
            query: query.into(),
            from,
            sort_by: SORT_BY_RELEVANCY.to_string(),
            language: "en".to_string(),
        }
    }

    /// Set the language filter.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = language.into();
        self
    }

    /// Set the sort order.
    pub fn with_sort_by<S: Into<String>>(mut self, sort_by: S) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// Query-string parameters, without the credential.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("from", self.from.format("%Y-%m-%d").to_string()),
            ("sortBy", self.sort_by.clone()),
            ("language", self.language.clone()),
        ]
    }
}

/// Publisher of an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// One article as returned by the API.
///
/// Only `title` takes part in ranking. The API sends `null` for titles and
/// URLs of removed articles; those deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Create an article with a title, description and URL.
    pub fn new<T: Into<String>, U: Into<String>>(
        title: T,
        description: Option<String>,
        url: U,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Name of the publisher, if known.
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw response body of the article search endpoint.
///
/// Success: `{"status": "ok", "totalResults": n, "articles": [...]}`.
/// Failure: `{"status": "error", "code": "...", "message": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewsResponse {
    /// Reduce the payload to a typed outcome.
    pub fn into_outcome(self) -> FetchOutcome {
        match self.status.as_str() {
            "ok" if !self.articles.is_empty() => FetchOutcome::Articles(self.articles),
            "error" => FetchOutcome::UpstreamError {
                code: self.code,
                message: self
                    .message
                    .unwrap_or_else(|| "unknown upstream error".to_string()),
            },
            _ => FetchOutcome::NoResults,
        }
    }
}

/// Result of a well-formed exchange with the news source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// At least one article matched.
    Articles(Vec<Article>),
    /// The request succeeded but nothing matched.
    NoResults,
    /// The API refused the request.
    UpstreamError {
        code: Option<String>,
        message: String,
    },
}
