//! Strike-level open interest rows
//!
//! One row per strike for a single expiry, with both call and put sides
//! flattened into plain numbers. Absent sides are represented by zeros.

use serde::{Deserialize, Serialize};

/// Call or put side of a strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    /// Exchange code used by the feed
    pub fn code(&self) -> &'static str {
        match self {
            OptionSide::Call => "CE",
            OptionSide::Put => "PE",
        }
    }
}

/// Per-side figures for one strike
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideFigures {
    /// Outstanding contracts
    pub open_interest: u64,
    /// Change in open interest since the previous session
    pub change_in_oi: i64,
    /// Last traded premium
    pub last_price: f64,
}

/// One row of the option chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeRow {
    pub strike: f64,
    pub call_open_interest: u64,
    pub put_open_interest: u64,
    pub call_change_in_oi: i64,
    pub put_change_in_oi: i64,
    pub call_last_price: f64,
    pub put_last_price: f64,
}

impl StrikeRow {
    /// Build a row from optional call and put figures
    ///
    /// A missing side contributes zeros.
    pub fn from_sides(strike: f64, call: Option<SideFigures>, put: Option<SideFigures>) -> Self {
        let call = call.unwrap_or_default();
        let put = put.unwrap_or_default();

        Self {
            strike,
            call_open_interest: call.open_interest,
            put_open_interest: put.open_interest,
            call_change_in_oi: call.change_in_oi,
            put_change_in_oi: put.change_in_oi,
            call_last_price: call.last_price,
            put_last_price: put.last_price,
        }
    }

    /// Call plus put open interest
    pub fn total_open_interest(&self) -> u64 {
        self.call_open_interest.saturating_add(self.put_open_interest)
    }

    pub fn side(&self, side: OptionSide) -> SideFigures {
        match side {
            OptionSide::Call => SideFigures {
                open_interest: self.call_open_interest,
                change_in_oi: self.call_change_in_oi,
                last_price: self.call_last_price,
            },
            OptionSide::Put => SideFigures {
                open_interest: self.put_open_interest,
                change_in_oi: self.put_change_in_oi,
                last_price: self.put_last_price,
            },
        }
    }
}
