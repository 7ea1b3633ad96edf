//! Binary crate for the `weather-compare` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive search / compare / favorites loop
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod interactive;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter_from_verbosity(cmd.verbose)))
        .with_writer(std::io::stderr)
        .init();

    cmd.run().await
}

/// Log filter for a `-v` count.
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
