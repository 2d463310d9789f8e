//! CLI module
//!
//! Command-line interface for browsing wallet history.
//!
//! # Commands
//!
//! - `list` - Fetch a window of transactions (or every page with `--all`)
//! - `cursor` - Decode or encode cursor tokens
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, CursorAction, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
