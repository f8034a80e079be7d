//! News source: the upstream article search API.
//!
//! [`NewsSource`] is the seam between the search pipeline and the network.
//! [`NewsApiClient`] implements it over HTTP; tests substitute canned
//! sources. Responses are reduced to a typed [`FetchOutcome`] so that
//! upstream errors, empty result sets and articles are distinct values,
//! while transport failures surface as [`PulseError::Transport`].
//!
//! [`PulseError::Transport`]: crate::error::PulseError::Transport

pub mod article;
pub mod client;
pub mod window;

use std::future::Future;

use crate::error::Result;

pub use article::{Article, ArticleSource, FetchOutcome, NewsRequest, NewsResponse};
pub use client::NewsApiClient;
pub use window::SearchWindow;

/// Something that can look up articles for a query.
pub trait NewsSource {
    /// Fetch the articles matching `request`.
    ///
    /// `Err` is reserved for transport failures; every well-formed upstream
    /// answer, including an error payload, is an `Ok` outcome.
    fn fetch(&self, request: &NewsRequest) -> impl Future<Output = Result<FetchOutcome>> + Send;
}
