//! Command implementations for Pulse CLI.

use std::io::Write;

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PulseConfig;
use crate::error::Result;
use crate::news::{NewsApiClient, NewsSource};
use crate::ranking::SimilarityRanker;
use crate::search::{SearchOutcome, SearchService};
use crate::session::{Input, Query, Session};

const PROMPT: &str = "pulse> ";

/// Execute a CLI command.
pub async fn execute_command(args: PulseArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => run_search(search_args, &args).await,
        Command::Trending => output_topics(&args),
        Command::Window => show_window(&args),
        Command::Interactive => run_interactive(&args).await,
    }
}

/// Build the search pipeline from configuration.
pub fn build_service(config: &PulseConfig) -> Result<SearchService<NewsApiClient>> {
    let client = NewsApiClient::new(
        config.endpoint.clone(),
        config.require_api_key()?,
        config.timeout(),
    )?;
    debug!("Using {client:?}");

    let ranker = SimilarityRanker::new()?;
    Ok(SearchService::from_config(client, ranker, config))
}

/// Search once if there is a query.
///
/// Without a query this returns `Ok(None)` and `connect` is never called,
/// so an idle request needs no credentials and sends nothing upstream.
pub async fn search_once<S, F>(query: Option<Query>, connect: F) -> Result<Option<SearchOutcome>>
where
    S: NewsSource,
    F: FnOnce() -> Result<SearchService<S>>,
{
    let Some(query) = query else {
        debug!("No query given, staying idle");
        return Ok(None);
    };

    let service = connect()?;
    Ok(Some(service.search(&query).await))
}

/// Run a single search.
async fn run_search(search_args: &SearchArgs, cli_args: &PulseArgs) -> Result<()> {
    let config = cli_args.load_config()?;

    match search_once(search_args.query(), || build_service(&config)).await? {
        Some(outcome) => output_outcome(&outcome, config.description_limit, cli_args),
        None => output_idle(cli_args),
    }
}

/// Print the data window.
fn show_window(cli_args: &PulseArgs) -> Result<()> {
    let config = cli_args.load_config()?;
    output_window(config.window(), cli_args)
}

/// Whether the banner and prompt go to stderr, keeping stdout pure JSON.
fn chrome_on_stderr(format: &OutputFormat) -> bool {
    matches!(format, OutputFormat::Json)
}

fn write_banner<W: Write>(out: &mut W, config: &PulseConfig) -> Result<()> {
    writeln!(out, "{}", render_topics())?;
    writeln!(out, "{}", config.window().caption())?;
    writeln!(out, "Type a number or a keyword, Enter to refresh, :q to quit.")?;
    writeln!(out)?;
    Ok(())
}

fn write_prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    Ok(())
}

/// One raw input line without its line ending; `None` if it is not UTF-8.
fn decode_line(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes)
        .ok()
        .map(|line| line.trim_end_matches(['\n', '\r']))
}

/// Interactive session: pick topics by number or type keywords.
async fn run_interactive(cli_args: &PulseArgs) -> Result<()> {
    let config = cli_args.load_config()?;
    let service = build_service(&config)?;

    let mut chrome: Box<dyn Write> = if chrome_on_stderr(&cli_args.output_format) {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };

    write_banner(&mut chrome, &config)?;
    output_idle(cli_args)?;

    let mut session = Session::new();
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();

    loop {
        write_prompt(&mut chrome)?;

        buf.clear();
        if stdin.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let Some(line) = decode_line(&buf) else {
            warn!("Ignoring input line that is not valid UTF-8");
            continue;
        };

        match Input::parse(line) {
            Input::Quit => break,
            Input::Select(selection) => session.select(selection),
            Input::Resubmit => {}
        }

        match session.query() {
            Some(query) => {
                let outcome = service.search(&query).await;
                output_outcome(&outcome, config.description_limit, cli_args)?;
            }
            None => output_idle(cli_args)?,
        }
    }

    info!("Interactive session ended");
    Ok(())
}
