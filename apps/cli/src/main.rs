//! # MoveQuote CLI
//!
//! Prices household moves from the command line.
//!
//! ```text
//! movequote quote --from Centurion --to Tzaneen \
//!     --item "Large Sofa=1" --item "Box (Medium)=12" --distance-km 299
//! movequote catalog --category Appliances
//! movequote --format json quote --request move.json --export
//! ```
//!
//! Logs go to stderr. `RUST_LOG` overrides the level; `--verbose` raises the
//! default from `info` to `debug`.

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use cli::Cli;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!(format = %cli.format, "Starting movequote");

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
