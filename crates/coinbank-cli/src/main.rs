//! Coinbank CLI - Validate multi-asset transfer messages
//!
//! Messages are read as JSON from a file, inline, or stdin (`-`).
//!
//! # Quick Start
//!
//! ```bash
//! coinbank validate transfer.json
//! coinbank signers transfer.json
//! coinbank parse-coins 123atom,20eth
//! RUST_LOG=debug coinbank --max-endpoints 8 validate - < transfer.json
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod display;

use commands::{coins, msg};

/// Coinbank CLI - Transfer validation for multi-asset ledgers
#[derive(Parser)]
#[command(name = "coinbank")]
#[command(author = "Coinbank Contributors")]
#[command(version)]
#[command(about = "Check that multi-asset transfers are well-formed and conserve value", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file with validation limits (toml, json or yaml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Maximum inputs or outputs per message (0 = unlimited)
    #[arg(long, global = true)]
    max_endpoints: Option<usize>,

    /// Maximum denominations per coin bundle (0 = unlimited)
    #[arg(long, global = true)]
    max_denoms: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a message and list who must authorize it
    Validate {
        /// Message JSON (file path, inline, or - for stdin)
        #[arg(default_value = "-")]
        msg: String,
    },

    /// List required authorities without validating
    Signers {
        /// Message JSON (file path, inline, or - for stdin)
        #[arg(default_value = "-")]
        msg: String,
    },

    /// Parse a coin list such as 123atom,20eth and check canonical form
    ParseCoins {
        /// Comma-separated coins
        coins: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let bank_config = config::with_overrides(
        config::load(cli.config.as_deref())?,
        cli.max_endpoints,
        cli.max_denoms,
    );

    let accepted = match cli.command {
        Commands::Validate { msg: input } => msg::validate(&input, &bank_config)?,
        Commands::Signers { msg: input } => {
            msg::signers(&input)?;
            true
        }
        Commands::ParseCoins { coins: input } => coins::parse(&input, &bank_config)?,
    };

    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
