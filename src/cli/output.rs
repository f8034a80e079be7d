//! Output formatting for CLI commands.

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::cli::args::{OutputFormat, PulseArgs};
use crate::error::Result;
use crate::news::window::SearchWindow;
use crate::search::{Hit, SearchOutcome};
use crate::session::Topic;

/// Shown while no query is selected.
pub const IDLE_PROMPT: &str = "Select a trending topic above or type a keyword to begin.";

/// Shown for articles without a description.
pub const NO_SUMMARY: &str = "No summary available";

/// A trending topic with its display number.
#[derive(Debug, Serialize)]
pub struct TopicEntry {
    pub number: usize,
    pub label: &'static str,
}

/// The data window as printed.
#[derive(Debug, Serialize)]
pub struct WindowInfo {
    pub start: String,
    pub end: String,
    pub caption: String,
}

impl From<SearchWindow> for WindowInfo {
    fn from(window: SearchWindow) -> Self {
        WindowInfo {
            start: window.start.to_string(),
            end: window.end.to_string(),
            caption: window.caption(),
        }
    }
}

/// Output a search outcome in the requested format.
pub fn output_outcome(
    outcome: &SearchOutcome,
    description_limit: usize,
    args: &PulseArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", render_outcome(outcome, description_limit));
            Ok(())
        }
        OutputFormat::Json => output_json(outcome, args),
    }
}

/// Output the trending topics.
pub fn output_topics(args: &PulseArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", render_topics());
            Ok(())
        }
        OutputFormat::Json => {
            let entries: Vec<TopicEntry> = Topic::ALL
                .iter()
                .map(|t| TopicEntry {
                    number: t.number(),
                    label: t.label(),
                })
                .collect();
            output_json(&entries, args)
        }
    }
}

/// Output the data window.
pub fn output_window(window: SearchWindow, args: &PulseArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", window.caption());
            Ok(())
        }
        OutputFormat::Json => output_json(&WindowInfo::from(window), args),
    }
}

/// Output the idle prompt.
pub fn output_idle(args: &PulseArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{IDLE_PROMPT}");
            Ok(())
        }
        OutputFormat::Json => output_json(&serde_json::json!({ "outcome": "idle" }), args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PulseArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Numbered list of trending topics.
pub fn render_topics() -> String {
    let mut out = String::from("Trending Topics:\n════════════════\n");
    for topic in Topic::ALL {
        out.push_str(&format!("  {}. {}\n", topic.number(), topic.label()));
    }
    out
}

/// Human-readable rendering of a search outcome.
pub fn render_outcome(outcome: &SearchOutcome, description_limit: usize) -> String {
    match outcome {
        SearchOutcome::Results {
            query,
            window,
            hits,
        } => {
            let heading = format!("Top matches for '{query}'");
            let mut out = format!(
                "{heading}\n{}\n{}\n",
                "═".repeat(heading.graphemes(true).count()),
                window.caption()
            );
            for (i, hit) in hits.iter().enumerate() {
                out.push('\n');
                out.push_str(&render_hit(i + 1, hit, description_limit));
            }
            out
        }
        // Every other outcome carries a notice.
        other => other.notice().unwrap_or_default(),
    }
}

/// One result card.
pub fn render_hit(rank: usize, hit: &Hit, description_limit: usize) -> String {
    let article = &hit.article;
    let mut out = format!("[{rank}] MATCH: {:.1}%", hit.match_percent());
    if let Some(source) = article.source_name() {
        out.push_str(&format!("  ({source})"));
    }
    out.push('\n');
    out.push_str(&article.title);
    out.push('\n');
    out.push_str(&summarize(article.description.as_deref(), description_limit));
    out.push('\n');
    out.push_str(&format!("Read More → {}\n", article.url));
    out.push_str("─────────────\n");
    out
}

/// Description cut to `limit` grapheme clusters, always followed by `...`.
/// A missing or empty description reads as [`NO_SUMMARY`].
pub fn summarize(description: Option<&str>, limit: usize) -> String {
    let text = description.filter(|d| !d.is_empty()).unwrap_or(NO_SUMMARY);
    let mut out: String = text.graphemes(true).take(limit).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::article::Article;
    use crate::session::Query;
    use chrono::NaiveDate;

    fn hit(description: Option<&str>, score: f64) -> Hit {
        Hit {
            article: Article::new(
                "Quantum chip unveiled",
                description.map(str::to_string),
                "https://example.com/quantum",
            ),
            score,
        }
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize(None, 200), "No summary available...");
        assert_eq!(summarize(Some(""), 200), "No summary available...");
        assert_eq!(summarize(Some("short"), 200), "short...");
        assert_eq!(summarize(Some("abcdef"), 3), "abc...");

        let long = "x".repeat(250);
        assert_eq!(summarize(Some(&long), 200).len(), 203);
    }

    #[test]
    fn test_summarize_graphemes() {
        // "é" as e + combining accent stays whole.
        let text = "e\u{301}e\u{301}e\u{301}";
        assert_eq!(summarize(Some(text), 2), "e\u{301}e\u{301}...");
    }

    #[test]
    fn test_render_hit() {
        let card = render_hit(1, &hit(Some("Qubits everywhere"), 0.873), 200);
        assert!(card.starts_with("[1] MATCH: 87.3%"));
        assert!(card.contains("Quantum chip unveiled"));
        assert!(card.contains("Qubits everywhere..."));
        assert!(card.contains("Read More → https://example.com/quantum"));
    }

    #[test]
    fn test_render_results() {
        let window =
            SearchWindow::ending_on(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), 17, 2026);
        let outcome = SearchOutcome::Results {
            query: Query::parse("Quantum Computing").unwrap(),
            window,
            hits: vec![hit(None, 0.5), hit(None, 0.25)],
        };

        let text = render_outcome(&outcome, 200);
        assert!(text.starts_with("Top matches for 'Quantum Computing'"));
        assert!(text.contains("Data Window: Oct 01 - Oct 18, 2026"));
        assert!(text.contains("[2] MATCH: 25.0%"));
        assert!(text.contains("No summary available..."));
    }

    #[test]
    fn test_render_notice() {
        let outcome = SearchOutcome::ConnectionError {
            message: "timed out".to_string(),
        };
        assert_eq!(render_outcome(&outcome, 200), "Connection error: timed out");
    }

    #[test]
    fn test_render_topics() {
        let text = render_topics();
        assert!(text.contains("  1. Agentic AI\n"));
        assert!(text.contains("  8. Cloud 3.0\n"));
    }
}
