//! Headline metrics for one expiry

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::{atm_strike, max_pain_strike, OpenInterestTotals};
use crate::core::ChainSnapshot;
use crate::data::parse_expiry;

/// Every metric for a snapshot, with `None` where the metric is undefined
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainSummary {
    pub expiry: String,
    pub underlying_price: f64,
    pub strikes: usize,
    pub atm_strike: Option<f64>,
    pub max_pain_strike: Option<f64>,
    pub put_call_ratio: Option<f64>,
    pub totals: OpenInterestTotals,
    /// Calendar days from the reference date, when the expiry id is a date
    pub days_to_expiry: Option<i64>,
}

impl ChainSummary {
    /// Compute all metrics, measuring days to expiry from `today`
    pub fn compute(snapshot: &ChainSnapshot, today: NaiveDate) -> Self {
        let totals = OpenInterestTotals::from_snapshot(snapshot);

        let atm = atm_strike(snapshot, snapshot.underlying_price());
        let max_pain = max_pain_strike(snapshot);
        let pcr = totals.ratio();

        for err in [atm.as_ref().err(), max_pain.as_ref().err(), pcr.as_ref().err()]
            .into_iter()
            .flatten()
        {
            tracing::debug!("Metric unavailable for {}: {}", snapshot.expiry(), err);
        }

        Self {
            expiry: snapshot.expiry().to_string(),
            underlying_price: snapshot.underlying_price(),
            strikes: snapshot.len(),
            atm_strike: atm.ok(),
            max_pain_strike: max_pain.ok(),
            put_call_ratio: pcr.ok(),
            totals,
            days_to_expiry: parse_expiry(snapshot.expiry()).map(|d| (d - today).num_days()),
        }
    }
}

/// Two-decimal value, or "N/A" when undefined
pub fn or_na(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

impl fmt::Display for ChainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expiry:          {}", self.expiry)?;
        if let Some(days) = self.days_to_expiry {
            writeln!(f, "Days to expiry:  {}", days)?;
        }
        writeln!(f, "Underlying:      {:.2}", self.underlying_price)?;
        writeln!(f, "ATM strike:      {}", or_na(self.atm_strike))?;
        writeln!(f, "Max pain strike: {}", or_na(self.max_pain_strike))?;
        write!(f, "PCR:             {}", or_na(self.put_call_ratio))
    }
}
