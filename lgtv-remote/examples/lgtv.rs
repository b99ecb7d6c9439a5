//! Command-line remote for LG televisions
//!
//! The registry is not persisted, so every subcommand starts with a
//! discovery sweep.
//!
//! ```text
//! cargo run -p lgtv-remote --example lgtv -- discover
//! cargo run -p lgtv-remote --example lgtv -- pair <uuid>            # key shown on screen
//! cargo run -p lgtv-remote --example lgtv -- pair <uuid> <key>
//! cargo run -p lgtv-remote --example lgtv -- cmd <uuid> <key> <code>
//! ```

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lgtv_remote::logging::{init_logging, LoggingMode};
use lgtv_remote::{DiscoveryConfig, LgTvRemote, PairingStatus};

#[derive(Parser, Debug)]
#[command(name = "lgtv", about = "Discover and control LG UDAP televisions")]
struct Args {
    /// How long to collect discovery replies, in milliseconds
    #[arg(long, default_value = "1000")]
    window_ms: u64,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List televisions on the network
    Discover,
    /// Show the pairing key on screen, or confirm one
    Pair { uuid: String, key: Option<String> },
    /// End the pairing session
    Unpair { uuid: String, key: String },
    /// Send a key-input command
    Cmd { uuid: String, key: String, code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mode = if args.verbose {
        LoggingMode::Debug
    } else {
        LoggingMode::Development
    };
    init_logging(mode)?;

    let remote = LgTvRemote::builder()
        .discovery_config(
            DiscoveryConfig::default().with_listen_window(Duration::from_millis(args.window_ms)),
        )
        .build()?;

    let devices = remote.discover().await.context("discovery failed")?;

    match args.command {
        Command::Discover => {
            println!("{}", serde_json::to_string_pretty(&devices)?);
        }
        Command::Pair { uuid, key } => {
            let outcome = remote
                .start_pairing(&uuid, key.as_deref().unwrap_or(""))
                .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Unpair { uuid, key } => {
            connect(&remote, &uuid, &key).await?;
            let response = remote.end_pairing(&uuid).await?;
            println!("HTTP {}", response.status);
        }
        Command::Cmd { uuid, key, code } => {
            connect(&remote, &uuid, &key).await?;
            let response = remote.send_cmd(&uuid, &code).await?;
            println!("HTTP {}", response.status);
        }
    }

    Ok(())
}

/// Re-establish the session a previous process negotiated
async fn connect(remote: &LgTvRemote, uuid: &str, key: &str) -> Result<()> {
    let outcome = remote.start_pairing(uuid, key).await?;
    if outcome.status != PairingStatus::Connected {
        bail!("pairing key rejected by {}", outcome.device.friendly_name);
    }
    Ok(())
}
