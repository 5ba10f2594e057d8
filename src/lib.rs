//! # Nifty Chain - Option Chain Analytics
//!
//! Headline open interest metrics for NSE index and stock options.
//!
//! ## Overview
//!
//! For one expiry of a symbol's option chain the crate computes:
//! - **ATM strike**: the strike nearest the underlying price
//! - **Max pain**: the strike where OI-weighted distance to all strikes is smallest
//! - **Put/Call ratio**: total put open interest over total call open interest
//!
//! ## Key Components
//!
//! - **Data Fetching**: NSE public option chain API with a short-lived disk cache
//! - **Normalization**: raw feed records → sorted, unique strike rows
//! - **Analytics**: pure functions over a single-expiry snapshot
//! - **Report**: plain-text summary and strike table
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nifty_chain::prelude::*;
//!
//! let config = FeedConfig::default();
//! let feed = CachedFeed::new(NseClient::new(&config)?, config.cache.clone())?;
//! let payload = feed.fetch(&config.symbol)?;
//!
//! let expiry = payload.expiries()[0].clone();
//! let snapshot = normalize(&payload, &expiry)?;
//!
//! let atm = atm_strike(&snapshot, snapshot.underlying_price())?;
//! let max_pain = max_pain_strike(&snapshot)?;
//! match put_call_ratio(&snapshot) {
//!     Ok(pcr) => println!("ATM {atm} | max pain {max_pain} | PCR {pcr:.2}"),
//!     Err(ChainError::DegenerateRatio) => println!("ATM {atm} | max pain {max_pain} | PCR N/A"),
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), ChainError>(())
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Charting or interactive UI
//! - Retry or backoff on failed fetches
//! - Persist snapshots beyond the response cache

pub mod analytics;
pub mod config;
pub mod core;
pub mod data;
pub mod report;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::core::{
        ChainError, ChainResult, ChainSnapshot, OptionSide, SideFigures, StrikeRow,
    };

    pub use crate::config::{CacheConfig, FeedConfig, InstrumentKind};

    pub use crate::data::{
        parse_expiry, CachedFeed, FeedCache, FeedPayload, FeedRecord, FeedSource, NseClient,
        SideQuote,
    };

    pub use crate::analytics::{
        atm_strike, max_pain_strike, normalize, pain_curve, put_call_ratio, ChainSummary,
        OpenInterestTotals, PainPoint,
    };

    pub use crate::report::{render_summary, render_table};
}

// Re-export main types at crate root
pub use crate::core::{ChainError, ChainResult, ChainSnapshot, StrikeRow};
