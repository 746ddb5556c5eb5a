mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use std::process;
use tracing::Level;

const EXIT_ERROR: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    configure_logging(cli.verbose, cli.debug, cli.quiet);

    if let Err(e) = commands::run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(EXIT_ERROR);
    }
}

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// the JSON output.
fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let log_level = log_level(verbose, debug, quiet);

    // RUST_LOG wins over the flags when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Level selected by the global flags; `--quiet` beats `--debug` beats `--verbose`
fn log_level(verbose: bool, debug: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}
