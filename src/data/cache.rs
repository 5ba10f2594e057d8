//! Local response caching
//!
//! Keeps the last raw response body per symbol on disk so repeated runs
//! within a few minutes do not hit the exchange again.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use super::feed::FeedPayload;
use super::nse::{decode_body, FeedSource};
use crate::config::CacheConfig;
use crate::core::ChainResult;

/// Raw response cache
pub struct FeedCache {
    config: CacheConfig,
}

impl FeedCache {
    pub fn new(config: CacheConfig) -> ChainResult<Self> {
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)?;
        }

        Ok(Self { config })
    }

    fn cache_path(&self, symbol: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(format!("{}_chain.json", symbol.trim().to_uppercase()))
    }

    /// Entry exists and is younger than the configured max age
    pub fn is_valid(&self, symbol: &str) -> bool {
        if !self.config.enabled {
            return false;
        }

        let modified = match fs::metadata(self.cache_path(symbol)).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return false,
        };

        // An mtime in the future counts as just written
        let age = modified.elapsed().unwrap_or(Duration::ZERO);
        age < Duration::from_secs(self.config.max_age_secs)
    }

    /// Store a response body; written to a temp file and renamed into place
    pub fn save(&self, symbol: &str, body: &str) -> ChainResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.cache_path(symbol);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &path)?;

        tracing::info!("Cached option chain for {} at {:?}", symbol, path);
        Ok(())
    }

    /// Fresh body for a symbol
    ///
    /// An entry that no longer decodes is removed and reported as a miss.
    pub fn load(&self, symbol: &str) -> ChainResult<Option<String>> {
        if !self.is_valid(symbol) {
            return Ok(None);
        }

        let body = match fs::read_to_string(self.cache_path(symbol)) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Unreadable cache entry for {}: {}", symbol, e);
                self.clear(symbol)?;
                return Ok(None);
            }
        };

        if let Err(e) = decode_body(symbol, &body) {
            tracing::warn!("Discarding corrupt cache entry for {}: {}", symbol, e);
            self.clear(symbol)?;
            return Ok(None);
        }

        tracing::info!("Loaded option chain for {} from cache", symbol);
        Ok(Some(body))
    }

    /// Drop the entry for a symbol, if any
    pub fn clear(&self, symbol: &str) -> ChainResult<()> {
        let path = self.cache_path(symbol);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Feed source that serves fresh cache entries before going to the network
pub struct CachedFeed<S> {
    source: S,
    cache: FeedCache,
}

impl<S: FeedSource> CachedFeed<S> {
    pub fn new(source: S, config: CacheConfig) -> ChainResult<Self> {
        Ok(Self {
            source,
            cache: FeedCache::new(config)?,
        })
    }

    /// Force refresh (bypass cache)
    pub fn refresh(&self, symbol: &str) -> ChainResult<FeedPayload> {
        self.cache.clear(symbol)?;
        self.fetch(symbol)
    }
}

impl<S: FeedSource> FeedSource for CachedFeed<S> {
    fn fetch_raw(&self, symbol: &str) -> ChainResult<String> {
        if let Some(body) = self.cache.load(symbol)? {
            return Ok(body);
        }

        tracing::info!("Fetching fresh option chain for {}", symbol);
        let body = self.source.fetch_raw(symbol)?;

        // Only bodies that decode are worth keeping
        decode_body(symbol, &body)?;
        self.cache.save(symbol, &body)?;

        Ok(body)
    }
}
