//! Nifty Chain CLI
//!
//! Fetches an option chain and prints ATM strike, max pain, PCR and the
//! strike table for one expiry.

use anyhow::{Context, Result};
use chrono::{FixedOffset, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use nifty_chain::prelude::*;

/// Option chain analytics for NSE index and stock options
#[derive(Parser)]
#[command(name = "nifty-chain", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Underlying symbol (overrides config)
    #[arg(long, global = true)]
    symbol: Option<String>,

    /// Treat the symbol as a single stock rather than an index
    #[arg(long, global = true)]
    equity: bool,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read a saved payload instead of fetching
    #[arg(long, global = true)]
    payload: Option<PathBuf>,

    /// Skip the response cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Refetch even if the cache is fresh
    #[arg(long, global = true)]
    refresh: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the expiries the feed offers
    Expiries,

    /// Metrics and strike table for one expiry
    Summary {
        /// Expiry identifier, e.g. 28-Nov-2024 (default: nearest listed)
        #[arg(long)]
        expiry: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    summary: &'a ChainSummary,
    rows: &'a [StrikeRow],
}

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let payload = load_payload(&cli, &config)?;

    match cli.command {
        Command::Expiries => {
            for expiry in payload.expiries() {
                println!("{}", expiry);
            }
        }
        Command::Summary { expiry, json } => {
            let expiry = match expiry {
                Some(e) => e,
                None => payload
                    .expiries()
                    .first()
                    .cloned()
                    .context("feed lists no expiries")?,
            };

            let snapshot = normalize(&payload, &expiry)
                .with_context(|| format!("cannot build chain for {}", config.symbol))?;

            let ist = FixedOffset::east_opt(IST_OFFSET_SECS).context("invalid IST offset")?;
            let today = Utc::now().with_timezone(&ist).date_naive();
            let summary = ChainSummary::compute(&snapshot, today);

            if json {
                let out = SummaryOutput {
                    summary: &summary,
                    rows: snapshot.rows(),
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{} option chain", config.symbol);
                if let Some(ts) = snapshot.timestamp() {
                    println!("As of {}", ts);
                }
                println!();
                println!("{}", render_summary(&summary));
                print!("{}", render_table(&snapshot, summary.atm_strike));
            }
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<FeedConfig> {
    let mut config = match &cli.config {
        Some(path) => FeedConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FeedConfig::default(),
    };

    if let Some(symbol) = &cli.symbol {
        config.symbol = symbol.to_uppercase();
    }
    if cli.equity {
        config.kind = InstrumentKind::Equity;
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }

    Ok(config)
}

fn load_payload(cli: &Cli, config: &FeedConfig) -> Result<FeedPayload> {
    if let Some(path) = &cli.payload {
        tracing::info!("Reading saved payload from {}", path.display());
        return FeedPayload::from_file(path)
            .with_context(|| format!("failed to read payload {}", path.display()));
    }

    let feed = CachedFeed::new(NseClient::new(config)?, config.cache.clone())?;
    let payload = if cli.refresh {
        feed.refresh(&config.symbol)?
    } else {
        feed.fetch(&config.symbol)?
    };

    Ok(payload)
}
