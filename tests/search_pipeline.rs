use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use pulse::analysis::analyzer::{Analyzer, StandardAnalyzer};
use pulse::analysis::token::TokenStream;
use pulse::cli::commands::search_once;
use pulse::error::{PulseError, Result};
use pulse::news::{Article, FetchOutcome, NewsRequest, NewsSource, SearchWindow};
use pulse::ranking::SimilarityRanker;
use pulse::search::{SearchOutcome, SearchService};
use pulse::session::{Input, Query, Selection, Session, Topic};

enum Canned {
    Outcome(FetchOutcome),
    Transport(&'static str),
}

/// News source returning a fixed answer and recording requests.
struct StubSource {
    canned: Canned,
    requests: Mutex<Vec<NewsRequest>>,
}

impl StubSource {
    fn new(canned: Canned) -> Self {
        StubSource {
            canned,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<NewsRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl NewsSource for StubSource {
    async fn fetch(&self, request: &NewsRequest) -> Result<FetchOutcome> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.canned {
            Canned::Outcome(outcome) => Ok(outcome.clone()),
            Canned::Transport(message) => Err(PulseError::transport(*message)),
        }
    }
}

/// Standard analysis that counts how often it runs.
struct CountingAnalyzer {
    inner: StandardAnalyzer,
    calls: AtomicUsize,
}

impl CountingAnalyzer {
    fn new() -> Self {
        CountingAnalyzer {
            inner: StandardAnalyzer::new().unwrap(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl Analyzer for CountingAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn window() -> SearchWindow {
    SearchWindow::ending_on(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), 30, 2026)
}

fn article(title: &str, n: usize) -> Article {
    Article::new(title, None, format!("https://example.com/{n}"))
}

fn service(canned: Canned) -> (SearchService<StubSource>, Arc<CountingAnalyzer>) {
    let analyzer = Arc::new(CountingAnalyzer::new());
    let ranker = SimilarityRanker::with_analyzer(analyzer.clone());
    (
        SearchService::new(StubSource::new(canned), ranker),
        analyzer,
    )
}

#[tokio::test]
async fn articles_are_ranked_best_first() {
    let articles = vec![
        article("Local bakery wins award", 0),
        article("Quantum Computing breakthrough announced", 1),
        article("New quantum computing chip unveiled", 2),
    ];
    let (service, _) = service(Canned::Outcome(FetchOutcome::Articles(articles)));
    let query = Topic::QuantumComputing.query();

    let outcome = service.search_within(&query, window()).await;
    let SearchOutcome::Results { hits, window: w, .. } = &outcome else {
        panic!("expected results, got {outcome:?}");
    };

    assert_eq!(*w, window());
    assert_eq!(hits.len(), 3);
    assert_ne!(hits[0].article.url, "https://example.com/0");
    assert_eq!(hits[2].article.url, "https://example.com/0");
    assert_eq!(hits[2].score, 0.0);
    assert!(outcome.notice().is_none());
}

#[tokio::test]
async fn request_carries_query_and_window() {
    let (service, _) = service(Canned::Outcome(FetchOutcome::NoResults));
    let service = service.with_language("de");
    let query = Query::parse("  fusion energy ").unwrap();

    service.search_within(&query, window()).await;

    let requests = service.source().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query, "fusion energy");
    assert_eq!(requests[0].from, NaiveDate::from_ymd_opt(2026, 9, 18).unwrap());
    assert_eq!(requests[0].sort_by, "relevancy");
    assert_eq!(requests[0].language, "de");
}

#[tokio::test]
async fn results_are_limited_to_top_k() {
    let articles: Vec<Article> = (0..12)
        .map(|i| article(&format!("Starship flight {i} report"), i))
        .collect();
    let (service, _) = service(Canned::Outcome(FetchOutcome::Articles(articles)));

    let outcome = service
        .search_within(&Topic::SpacexStarship.query(), window())
        .await;
    assert_eq!(outcome.hits().len(), 5);
}

#[tokio::test]
async fn no_results_skips_ranking() {
    let (service, analyzer) = service(Canned::Outcome(FetchOutcome::NoResults));
    let query = Query::parse("obscure gadget").unwrap();

    let outcome = service.search_within(&query, window()).await;

    assert!(matches!(outcome, SearchOutcome::NoResults { .. }));
    assert_eq!(
        outcome.notice().unwrap(),
        "No news found for 'obscure gadget' in the last 30 days."
    );
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_error_is_reported() {
    let (service, analyzer) = service(Canned::Outcome(FetchOutcome::UpstreamError {
        code: Some("apiKeyInvalid".to_string()),
        message: "Your API key is invalid.".to_string(),
    }));

    let outcome = service
        .search_within(&Topic::CyberDefense.query(), window())
        .await;

    assert_eq!(
        outcome.notice().unwrap(),
        "API Error: Your API key is invalid."
    );
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failure_is_connection_error() {
    let (service, _) = service(Canned::Transport("dns error"));

    let outcome = service.search_within(&Topic::Cloud3.query(), window()).await;

    let SearchOutcome::ConnectionError { message } = &outcome else {
        panic!("expected connection error, got {outcome:?}");
    };
    assert!(message.contains("dns error"));
    assert!(outcome.notice().unwrap().starts_with("Connection error: "));
}

#[tokio::test]
async fn session_drives_searches() {
    let articles = vec![article("Agentic AI agents ship", 0)];
    let (service, _) = service(Canned::Outcome(FetchOutcome::Articles(articles)));
    let mut session = Session::new();

    // Idle: nothing to search.
    if let Input::Select(selection) = Input::parse("   ") {
        session.select(selection);
    }
    assert!(session.query().is_none());

    match Input::parse("1") {
        Input::Select(selection) => session.select(selection),
        other => panic!("unexpected input: {other:?}"),
    }
    assert_eq!(session.selected(), Some(&Selection::Preset(Topic::AgenticAi)));

    let query = session.query().unwrap();
    let outcome = service.search_within(&query, window()).await;
    assert_eq!(outcome.hits().len(), 1);
    assert!(outcome.hits()[0].score > 0.0);

    // Enter re-submits the same selection.
    assert_eq!(Input::parse(""), Input::Resubmit);
    assert_eq!(session.query().unwrap(), query);
    assert_eq!(service.source().requests().len(), 1);
}

#[tokio::test]
async fn blank_query_never_reaches_the_source() {
    let connected = AtomicBool::new(false);

    let outcome = search_once(Query::parse("   "), || {
        connected.store(true, Ordering::SeqCst);
        Ok(service(Canned::Outcome(FetchOutcome::NoResults)).0)
    })
    .await
    .unwrap();

    assert!(outcome.is_none());
    assert!(!connected.load(Ordering::SeqCst));
}

#[tokio::test]
async fn blank_query_needs_no_credentials() {
    let outcome = search_once(None, || -> Result<SearchService<StubSource>> {
        Err(PulseError::config("NEWS_API_KEY is not set"))
    })
    .await
    .unwrap();

    assert!(outcome.is_none());
}

#[tokio::test]
async fn query_is_searched_once() {
    let articles = vec![article("EV battery tech leaps ahead", 0)];
    let outcome = search_once(Some(Topic::EvBatteryTech.query()), || {
        Ok(service(Canned::Outcome(FetchOutcome::Articles(articles))).0)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(outcome.hits().len(), 1);
    assert!(outcome.hits()[0].score > 0.0);
}
