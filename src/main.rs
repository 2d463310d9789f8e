// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! wallet-history CLI
//!
//! Command-line interface for paging through wallet transaction history

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wallet_history::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let runner = Runner::new(cli);

    // Initialize logging; stdout is reserved for JSON output
    let level: tracing::Level = runner.log_level().into();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
