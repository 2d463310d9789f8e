//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, CursorAction, OutputFormat};
use crate::cli::server::{serve, ServerConfig};
use crate::config::HistoryConfig;
use crate::error::Result;
use crate::history::TransactionHistory;
use crate::pagination::{Cursor, FetchRequest};
use crate::types::{LogLevel, OptionStringExt};
use futures::StreamExt;
use serde::Serialize;
use serde_json::json;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::List {
                wallet,
                cursor,
                limit,
                until,
                all,
            } => {
                let request = FetchRequest {
                    cursor: cursor.clone().none_if_empty(),
                    limit: *limit,
                    until_trx_id: until.clone().none_if_empty(),
                };
                self.list(wallet, request, *all).await
            }
            Commands::Cursor { action } => self.cursor(action),
            Commands::Serve { port } => {
                let history = TransactionHistory::from_config(self.load_config()?);
                serve(ServerConfig { history }, *port).await
            }
        }
    }

    /// Log level for the subscriber, `--verbose` wins over the config file
    pub fn log_level(&self) -> LogLevel {
        if self.cli.verbose {
            return LogLevel::Debug;
        }
        self.cli
            .config
            .as_ref()
            .and_then(|path| HistoryConfig::from_file(path).ok())
            .map(|config| config.log_level)
            .unwrap_or_default()
    }

    /// Load the config file (if any), apply flag overrides and validate
    pub fn load_config(&self) -> Result<HistoryConfig> {
        let mut config = match &self.cli.config {
            Some(path) => HistoryConfig::from_file(path)?,
            None => HistoryConfig::new(String::new()),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(dir) = &self.cli.credentials_dir {
            config.credentials_dir.clone_from(dir);
        }
        if self.cli.verbose {
            config.log_level = LogLevel::Debug;
        }

        config.validate()?;
        Ok(config)
    }

    async fn list(&self, wallet: &str, request: FetchRequest, all: bool) -> Result<()> {
        let history = TransactionHistory::from_config(self.load_config()?);

        if !all {
            let page = history.list_trxs(wallet, &request).await?;
            return self.output_message(&page);
        }

        let pages = history.walk(wallet, request).await?;
        futures::pin_mut!(pages);

        let mut page_count = 0usize;
        let mut trx_count = 0usize;
        while let Some(page) = pages.next().await {
            let page = page?;
            page_count += 1;
            trx_count += page.trxs.len();
            self.output_message(&page)?;
        }

        info!(wallet, pages = page_count, transactions = trx_count, "History walk complete");
        Ok(())
    }

    fn cursor(&self, action: &CursorAction) -> Result<()> {
        match action {
            CursorAction::Decode { token } => {
                let cursor = Cursor::decode(Some(token.as_str()));
                self.output_message(&cursor)
            }
            CursorAction::Encode { next_trx_id, skip } => {
                let cursor = Cursor::new(next_trx_id.as_str(), *skip);
                self.output_message(&json!({ "cursor": cursor.encode() }))
            }
        }
    }

    /// Print a message to stdout
    fn output_message<T: Serialize>(&self, msg: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        println!("{line}");
        Ok(())
    }
}
