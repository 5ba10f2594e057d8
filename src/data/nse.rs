//! NSE option chain fetcher
//!
//! Fetches the public option chain for an index or equity symbol from
//! nseindia.com. The site refuses API calls without session cookies, so
//! every fetch first visits the home page with the same cookie store.
//!
//! Note: this is the exchange's public website API, intended for personal use.
//! It is undocumented and may change without notice.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use std::time::Duration;

use super::feed::FeedPayload;
use crate::config::{FeedConfig, InstrumentKind};
use crate::core::{ChainError, ChainResult};

/// Anything that can produce a raw option chain payload for a symbol
pub trait FeedSource {
    /// Response body exactly as received
    fn fetch_raw(&self, symbol: &str) -> ChainResult<String>;

    /// Decoded payload; an undecodable body is `FetchFailed`
    fn fetch(&self, symbol: &str) -> ChainResult<FeedPayload> {
        let raw = self.fetch_raw(symbol)?;
        decode_body(symbol, &raw)
    }
}

pub(crate) fn decode_body(symbol: &str, raw: &str) -> ChainResult<FeedPayload> {
    FeedPayload::from_json_str(raw).map_err(|e| {
        ChainError::fetch_failed(format!("Undecodable option chain for {}: {}", symbol, e))
    })
}

/// NSE website client
pub struct NseClient {
    client: Client,
    base_url: String,
    kind: InstrumentKind,
    bootstrap_timeout: Duration,
    request_timeout: Duration,
}

impl NseClient {
    pub fn new(config: &FeedConfig) -> ChainResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        let referer = HeaderValue::from_str(&format!("{}/option-chain", base_url))
            .map_err(|e| ChainError::invalid_input(format!("Bad base url: {}", e)))?;
        headers.insert(REFERER, referer);

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| ChainError::fetch_failed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            kind: config.kind,
            bootstrap_timeout: Duration::from_secs(config.bootstrap_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// Option chain endpoint; the symbol goes in the query string
    pub fn chain_url(&self) -> String {
        format!("{}/api/{}", self.base_url, self.kind.endpoint())
    }

    /// Visit the home page so the cookie store picks up session cookies
    fn bootstrap_session(&self) -> ChainResult<()> {
        self.client
            .get(&self.base_url)
            .timeout(self.bootstrap_timeout)
            .send()
            .map_err(|e| ChainError::fetch_failed(format!("Session bootstrap failed: {}", e)))?;
        Ok(())
    }
}

impl FeedSource for NseClient {
    fn fetch_raw(&self, symbol: &str) -> ChainResult<String> {
        self.bootstrap_session()?;

        let symbol = symbol.trim().to_uppercase();
        let url = self.chain_url();
        tracing::info!("Fetching option chain for {} from {}", symbol, url);

        let body = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.as_str())])
            .timeout(self.request_timeout)
            .send()
            .map_err(|e| ChainError::fetch_failed(e.to_string()))?
            .error_for_status()
            .map_err(|e| ChainError::fetch_failed(e.to_string()))?
            .text()
            .map_err(|e| ChainError::fetch_failed(format!("Failed to read option chain: {}", e)))?;

        tracing::debug!("Received {} bytes for {}", body.len(), symbol);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_url() {
        let client = NseClient::new(&FeedConfig::default()).unwrap();
        assert_eq!(
            client.chain_url(),
            "https://www.nseindia.com/api/option-chain-indices"
        );
    }

    #[test]
    fn test_equity_url() {
        let config = FeedConfig {
            kind: InstrumentKind::Equity,
            base_url: "https://example.test/".to_string(),
            ..Default::default()
        };
        let client = NseClient::new(&config).unwrap();
        assert_eq!(
            client.chain_url(),
            "https://example.test/api/option-chain-equities"
        );
    }

    struct FixedBody(&'static str);

    impl FeedSource for FixedBody {
        fn fetch_raw(&self, _symbol: &str) -> ChainResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_undecodable_body_is_fetch_failed() {
        let source = FixedBody("<html>Access Denied</html>");
        assert!(matches!(
            source.fetch("NIFTY"),
            Err(ChainError::FetchFailed(msg)) if msg.contains("NIFTY")
        ));

        let truncated = FixedBody(r#"{"records":{"expiryD"#);
        assert!(matches!(truncated.fetch("NIFTY"), Err(ChainError::FetchFailed(_))));
    }

    #[test]
    fn test_decodes_body() {
        let source = FixedBody(r#"{"records":{"expiryDates":["E1"],"underlyingValue":100,"data":[]}}"#);
        let payload = source.fetch("NIFTY").unwrap();
        assert_eq!(payload.expiries(), ["E1".to_string()]);
    }

    #[test]
    #[ignore] // Requires network
    fn test_fetch_nifty() {
        let client = NseClient::new(&FeedConfig::default()).unwrap();
        let payload = client.fetch("NIFTY").unwrap();

        assert!(payload.underlying_value() > 0.0);
        assert!(!payload.expiries().is_empty());
        println!("NIFTY expiries: {:?}", payload.expiries());
    }
}
