//! Option chain snapshot for a single expiry
//!
//! A snapshot is built once per feed fetch and never mutated afterwards.
//! Rows are unique by strike and sorted ascending.

use serde::Serialize;

use super::error::{ChainError, ChainResult};
use super::row::StrikeRow;

/// Ordered strike rows for one expiry, tied to the underlying price at fetch time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainSnapshot {
    expiry: String,
    underlying_price: f64,
    timestamp: Option<String>,
    rows: Vec<StrikeRow>,
}

impl ChainSnapshot {
    /// Validate, deduplicate and sort rows into a snapshot
    ///
    /// When a strike appears more than once the last row seen is kept.
    pub fn new(
        expiry: impl Into<String>,
        underlying_price: f64,
        rows: impl IntoIterator<Item = StrikeRow>,
    ) -> ChainResult<Self> {
        if !underlying_price.is_finite() || underlying_price <= 0.0 {
            return Err(ChainError::invalid_input(format!(
                "underlying price must be positive, got {}",
                underlying_price
            )));
        }

        let mut unique: Vec<StrikeRow> = Vec::new();
        for row in rows {
            if !row.strike.is_finite() || row.strike <= 0.0 {
                return Err(ChainError::invalid_input(format!(
                    "strike must be positive, got {}",
                    row.strike
                )));
            }
            for price in [row.call_last_price, row.put_last_price] {
                if !price.is_finite() || price < 0.0 {
                    return Err(ChainError::invalid_input(format!(
                        "last price at strike {} must be non-negative, got {}",
                        row.strike, price
                    )));
                }
            }

            match unique.iter_mut().find(|r| r.strike == row.strike) {
                Some(existing) => {
                    tracing::warn!("Duplicate strike {} in feed, keeping last", row.strike);
                    *existing = row;
                }
                None => unique.push(row),
            }
        }

        unique.sort_by(|a, b| a.strike.total_cmp(&b.strike));

        Ok(Self {
            expiry: expiry.into(),
            underlying_price,
            timestamp: None,
            rows: unique,
        })
    }

    /// Attach the feed's own timestamp string
    pub fn with_timestamp(mut self, timestamp: Option<String>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    pub fn underlying_price(&self) -> f64 {
        self.underlying_price
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Rows sorted ascending by strike
    pub fn rows(&self) -> &[StrikeRow] {
        &self.rows
    }

    pub fn strikes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.strike).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at an exact strike
    pub fn row_at(&self, strike: f64) -> Option<&StrikeRow> {
        self.rows.iter().find(|r| r.strike == strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(strike: f64, call_oi: u64, put_oi: u64) -> StrikeRow {
        StrikeRow {
            strike,
            call_open_interest: call_oi,
            put_open_interest: put_oi,
            call_change_in_oi: 0,
            put_change_in_oi: 0,
            call_last_price: 0.0,
            put_last_price: 0.0,
        }
    }

    #[test]
    fn test_sorted_ascending() {
        let snap = ChainSnapshot::new(
            "E1",
            104.0,
            vec![row(120.0, 1, 1), row(100.0, 2, 2), row(110.0, 3, 3)],
        )
        .unwrap();

        assert_eq!(snap.strikes(), vec![100.0, 110.0, 120.0]);
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.expiry(), "E1");
    }

    #[test]
    fn test_duplicate_strike_last_wins() {
        let snap = ChainSnapshot::new(
            "E1",
            104.0,
            vec![row(100.0, 1, 1), row(110.0, 5, 5), row(100.0, 9, 7)],
        )
        .unwrap();

        assert_eq!(snap.len(), 2);
        let r = snap.row_at(100.0).unwrap();
        assert_eq!(r.call_open_interest, 9);
        assert_eq!(r.put_open_interest, 7);
    }

    #[test]
    fn test_rejects_bad_prices() {
        assert!(matches!(
            ChainSnapshot::new("E1", 0.0, vec![row(100.0, 1, 1)]),
            Err(ChainError::InvalidInput(_))
        ));
        assert!(matches!(
            ChainSnapshot::new("E1", 100.0, vec![row(-5.0, 1, 1)]),
            Err(ChainError::InvalidInput(_))
        ));
        assert!(matches!(
            ChainSnapshot::new("E1", f64::NAN, Vec::new()),
            Err(ChainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_bad_last_prices() {
        let mut negative = row(100.0, 1, 1);
        negative.call_last_price = -5.0;
        let mut nan = row(110.0, 1, 1);
        nan.put_last_price = f64::NAN;

        for bad in [negative, nan] {
            assert!(matches!(
                ChainSnapshot::new("E1", 100.0, vec![row(90.0, 1, 1), bad]),
                Err(ChainError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_empty_is_allowed() {
        let snap = ChainSnapshot::new("E1", 100.0, Vec::new()).unwrap();
        assert!(snap.is_empty());
        assert!(snap.timestamp().is_none());
    }
}
