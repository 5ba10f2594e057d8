//! At-the-money strike selection

use crate::core::{ChainError, ChainResult, ChainSnapshot};

/// Strike nearest to the underlying price
///
/// Equidistant strikes resolve to the lower one: rows are scanned in
/// ascending order and only a strictly smaller distance replaces the
/// current best.
pub fn atm_strike(snapshot: &ChainSnapshot, underlying_price: f64) -> ChainResult<f64> {
    let mut rows = snapshot.rows().iter();
    let first = rows.next().ok_or(ChainError::EmptyChain)?;

    let mut best = first.strike;
    let mut best_dist = (first.strike - underlying_price).abs();

    for row in rows {
        let dist = (row.strike - underlying_price).abs();
        if dist < best_dist {
            best = row.strike;
            best_dist = dist;
        }
    }

    Ok(best)
}
