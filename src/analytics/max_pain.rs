//! Max pain strike
//!
//! For each candidate strike `s` the pain is
//!
//! ```text
//! pain(s) = Σ_r |s - r.strike| * (r.call_oi + r.put_oi)
//! ```
//!
//! i.e. open interest weighted by distance. This is the simple OI-weighted
//! variant; it does not scale by premium or by intrinsic payout per side.
//! The max pain strike is the candidate with the smallest pain.
//!
//! All pairs are evaluated, O(n²) in the number of strikes. A single expiry
//! rarely has more than a few dozen strikes.

use serde::Serialize;

use crate::core::{ChainError, ChainResult, ChainSnapshot};

/// Pain evaluated at one candidate strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PainPoint {
    pub strike: f64,
    pub pain: f64,
}

/// Pain at every strike of the chain, in ascending strike order
pub fn pain_curve(snapshot: &ChainSnapshot) -> Vec<PainPoint> {
    let rows = snapshot.rows();

    rows.iter()
        .map(|candidate| {
            let pain = rows
                .iter()
                .map(|r| (candidate.strike - r.strike).abs() * r.total_open_interest() as f64)
                .sum();
            PainPoint {
                strike: candidate.strike,
                pain,
            }
        })
        .collect()
}

/// Strike minimising aggregate pain; ties go to the lowest strike
pub fn max_pain_strike(snapshot: &ChainSnapshot) -> ChainResult<f64> {
    let mut best: Option<PainPoint> = None;

    for point in pain_curve(snapshot) {
        match best {
            Some(b) if point.pain >= b.pain => {}
            _ => best = Some(point),
        }
    }

    best.map(|p| p.strike).ok_or(ChainError::EmptyChain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SideFigures, StrikeRow};

    fn oi(n: u64) -> Option<SideFigures> {
        Some(SideFigures {
            open_interest: n,
            ..Default::default()
        })
    }

    fn snapshot(rows: &[(f64, u64, u64)]) -> ChainSnapshot {
        let rows = rows
            .iter()
            .map(|&(k, c, p)| StrikeRow::from_sides(k, oi(c), oi(p)));
        ChainSnapshot::new("E1", 100.0, rows).unwrap()
    }

    #[test]
    fn test_two_strikes() {
        let snap = snapshot(&[(100.0, 500, 1000), (110.0, 800, 400)]);

        let curve = pain_curve(&snap);
        assert_eq!(curve[0], PainPoint { strike: 100.0, pain: 12000.0 });
        assert_eq!(curve[1], PainPoint { strike: 110.0, pain: 15000.0 });
        assert_eq!(max_pain_strike(&snap).unwrap(), 100.0);
    }

    #[test]
    fn test_tie_prefers_lowest() {
        // Symmetric OI: pain(100) == pain(110)
        let snap = snapshot(&[(110.0, 50, 50), (100.0, 50, 50)]);
        assert_eq!(max_pain_strike(&snap).unwrap(), 100.0);
    }

    #[test]
    fn test_heavy_middle_strike() {
        let snap = snapshot(&[
            (95.0, 10, 300),
            (100.0, 900, 900),
            (105.0, 400, 20),
            (110.0, 600, 5),
        ]);
        assert_eq!(max_pain_strike(&snap).unwrap(), 100.0);
    }

    #[test]
    fn test_matches_brute_force() {
        let rows: Vec<(f64, u64, u64)> = (0..40)
            .map(|i| {
                let k = 22000.0 + 50.0 * i as f64;
                let c = ((i * 7919) % 1301) as u64 * 75;
                let p = ((i * 104729) % 977) as u64 * 75;
                (k, c, p)
            })
            .collect();
        let snap = snapshot(&rows);
        let result = max_pain_strike(&snap).unwrap();

        let brute = |s: f64| -> f64 {
            rows.iter()
                .map(|&(k, c, p)| (s - k).abs() * (c + p) as f64)
                .sum()
        };
        let min = rows
            .iter()
            .map(|&(k, _, _)| brute(k))
            .fold(f64::INFINITY, f64::min);

        assert_eq!(brute(result), min);
        assert!(rows.iter().any(|&(k, _, _)| k == result));
    }

    #[test]
    fn test_zero_open_interest_everywhere() {
        // Every strike has zero pain; lowest wins
        let snap = snapshot(&[(120.0, 0, 0), (100.0, 0, 0), (110.0, 0, 0)]);
        assert_eq!(max_pain_strike(&snap).unwrap(), 100.0);
    }

    #[test]
    fn test_empty() {
        let snap = snapshot(&[]);
        assert!(pain_curve(&snap).is_empty());
        assert!(matches!(max_pain_strike(&snap), Err(ChainError::EmptyChain)));
    }
}
