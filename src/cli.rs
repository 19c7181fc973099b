//! Command-line interface

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use waflow_client::{Dispatcher, GraphClient, InputItem};
use waflow_core::Credentials;

/// WhatsApp Business Cloud API batch sender
#[derive(Parser)]
#[command(name = "waflow", version, about)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand)]
pub enum Command {
    /// Dispatch one Graph API request per item in a JSON file
    Run {
        /// Path to a JSON array of input items
        items: PathBuf,

        /// Capture per-item errors as output records instead of aborting
        #[arg(long)]
        continue_on_fail: bool,

        /// Pretty-print the output records
        #[arg(long)]
        pretty: bool,
    },
}

/// Execute the parsed command
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            items,
            continue_on_fail,
            pretty,
        } => {
            let raw = std::fs::read_to_string(&items)
                .with_context(|| format!("failed to read {}", items.display()))?;
            let items: Vec<InputItem> =
                serde_json::from_str(&raw).context("items file must be a JSON array of items")?;

            let credentials = Credentials::from_env()?;
            let transport = GraphClient::new(&credentials)?;
            let dispatcher =
                Dispatcher::new(transport, credentials).with_continue_on_fail(continue_on_fail);

            info!(items = items.len(), "dispatching items");
            let records = dispatcher.run(&items).await?;

            let output = if pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{output}");
            Ok(())
        }
    }
}
