//! Put/call open interest ratio

use serde::Serialize;

use crate::core::{ChainError, ChainResult, ChainSnapshot};

/// Summed open interest across the chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OpenInterestTotals {
    pub call: u64,
    pub put: u64,
}

impl OpenInterestTotals {
    pub fn from_snapshot(snapshot: &ChainSnapshot) -> Self {
        snapshot.rows().iter().fold(Self::default(), |acc, r| Self {
            call: acc.call.saturating_add(r.call_open_interest),
            put: acc.put.saturating_add(r.put_open_interest),
        })
    }

    /// Put OI over call OI
    ///
    /// Zero call OI is `DegenerateRatio`; the ratio is never infinite or NaN.
    pub fn ratio(&self) -> ChainResult<f64> {
        if self.call == 0 {
            return Err(ChainError::DegenerateRatio);
        }
        Ok(self.put as f64 / self.call as f64)
    }
}

/// Total put OI divided by total call OI
pub fn put_call_ratio(snapshot: &ChainSnapshot) -> ChainResult<f64> {
    OpenInterestTotals::from_snapshot(snapshot).ratio()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SideFigures, StrikeRow};

    fn snapshot(rows: &[(f64, u64, u64)]) -> ChainSnapshot {
        let oi = |n| {
            Some(SideFigures {
                open_interest: n,
                ..Default::default()
            })
        };
        let rows = rows
            .iter()
            .map(|&(k, c, p)| StrikeRow::from_sides(k, oi(c), oi(p)));
        ChainSnapshot::new("E1", 100.0, rows).unwrap()
    }

    #[test]
    fn test_ratio() {
        let snap = snapshot(&[(100.0, 500, 1000), (110.0, 800, 400)]);
        let totals = OpenInterestTotals::from_snapshot(&snap);
        assert_eq!(totals, OpenInterestTotals { call: 1300, put: 1400 });

        let pcr = put_call_ratio(&snap).unwrap();
        assert!((pcr - 1400.0 / 1300.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_puts_is_zero() {
        let snap = snapshot(&[(100.0, 500, 0)]);
        assert_eq!(put_call_ratio(&snap).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_call_oi_is_degenerate() {
        let snap = snapshot(&[(100.0, 0, 1000), (110.0, 0, 400)]);
        assert!(matches!(put_call_ratio(&snap), Err(ChainError::DegenerateRatio)));

        let empty = snapshot(&[]);
        assert!(matches!(put_call_ratio(&empty), Err(ChainError::DegenerateRatio)));
    }
}
