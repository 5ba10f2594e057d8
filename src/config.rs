//! Feed and cache configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::{ChainError, ChainResult};

/// Which option chain endpoint a symbol lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// NIFTY, BANKNIFTY, FINNIFTY, ...
    Index,
    /// Single-stock options
    Equity,
}

impl InstrumentKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            InstrumentKind::Index => "option-chain-indices",
            InstrumentKind::Equity => "option-chain-equities",
        }
    }
}

/// Raw response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refetching (seconds)
    pub max_age_secs: u64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_secs: 300,
            enabled: true,
        }
    }
}

/// Feed source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Underlying symbol, e.g. NIFTY
    pub symbol: String,
    pub kind: InstrumentKind,
    /// Exchange website root
    pub base_url: String,
    /// Timeout for the home page visit that seeds session cookies
    /// Default: 5
    pub bootstrap_timeout_secs: u64,
    /// Timeout for the option chain request itself
    /// Default: 10
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub cache: CacheConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            symbol: "NIFTY".to_string(),
            kind: InstrumentKind::Index,
            base_url: "https://www.nseindia.com".to_string(),
            bootstrap_timeout_secs: 5,
            request_timeout_secs: 10,
            user_agent: "Mozilla/5.0".to_string(),
            cache: CacheConfig::default(),
        }
    }
}

impl FeedConfig {
    /// Load from a JSON file; absent fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> ChainResult<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| ChainError::Serialization(e.to_string()))
    }
}
