//! Pulse CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use pulse::cli::args::*;
use pulse::cli::commands::*;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments using clap
    let args = PulseArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        // Request URLs carry the API key.
        .filter_module("reqwest", log_level.min(LevelFilter::Warn))
        .filter_module("hyper_util", log_level.min(LevelFilter::Warn))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // Execute the command
    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
