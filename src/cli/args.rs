//! Command line argument parsing for Pulse CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::PulseConfig;
use crate::error::Result;
use crate::session::{Query, Selection, Topic};

/// Pulse - technology news ranked by relevance to your query
#[derive(Parser, Debug, Clone)]
#[command(name = "pulse")]
#[command(about = "Technology news search ranked by TF-IDF similarity")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PulseArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// News API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Article search endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PulseArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Build the effective configuration: file, then flags and environment.
    pub fn load_config(&self) -> Result<PulseConfig> {
        let mut config = PulseConfig::load_or_default(self.config.as_ref())?;

        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Command::Search(search_args) = &self.command
            && let Some(limit) = search_args.limit
        {
            config.top_k = limit;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search news for a keyword or a trending topic
    Search(SearchArgs),

    /// List the trending topics
    Trending,

    /// Show the publication window searched
    Window,

    /// Pick topics and keywords interactively
    Interactive,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY", required_unless_present = "topic")]
    pub query: Option<String>,

    /// Trending topic, by number or name
    #[arg(short, long, value_name = "TOPIC", conflicts_with = "query")]
    pub topic: Option<Topic>,

    /// Maximum number of articles to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl SearchArgs {
    /// What the user asked for.
    pub fn selection(&self) -> Selection {
        match (&self.topic, &self.query) {
            (Some(topic), _) => Selection::Preset(*topic),
            (None, Some(query)) => Selection::FreeText(query.clone()),
            (None, None) => Selection::FreeText(String::new()),
        }
    }

    /// The query to run; `None` for blank input.
    pub fn query(&self) -> Option<Query> {
        self.selection().resolve()
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
