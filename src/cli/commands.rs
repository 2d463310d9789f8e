//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wallet transaction history CLI
#[derive(Parser, Debug)]
#[command(name = "wallet-history")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Wallet service base URL, overrides the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory with wallet credential files, overrides the config file
    #[arg(long, global = true)]
    pub credentials_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a window of a wallet's transactions
    List {
        /// Wallet name
        #[arg(short, long)]
        wallet: String,

        /// Cursor returned by a previous call
        #[arg(long)]
        cursor: Option<String>,

        /// Maximum transactions per page
        #[arg(short, long)]
        limit: Option<usize>,

        /// Stop before this transaction id
        #[arg(long)]
        until: Option<String>,

        /// Keep following the cursor until history is exhausted
        #[arg(long)]
        all: bool,
    },

    /// Inspect or build cursor tokens
    Cursor {
        #[command(subcommand)]
        action: CursorAction,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Cursor subcommands
#[derive(Subcommand, Debug)]
pub enum CursorAction {
    /// Show the fields of a cursor token
    Decode {
        /// Cursor token, e.g. "t4;1"
        token: String,
    },

    /// Build a cursor token
    Encode {
        /// Last consumed transaction id
        next_trx_id: String,

        /// Offset hint
        #[arg(default_value = "0")]
        skip: u64,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
