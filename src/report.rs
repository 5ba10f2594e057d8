//! Plain-text rendering of a chain

use std::fmt::Write;

use crate::analytics::ChainSummary;
use crate::core::{ChainSnapshot, OptionSide};

const WIDTH: usize = 11;

/// Column titles: calls read outwards from the strike, puts mirror them
fn headers() -> Vec<String> {
    let call = OptionSide::Call.code();
    let put = OptionSide::Put.code();
    vec![
        "Strike".to_string(),
        format!("{} OI", call),
        format!("{} Chg OI", call),
        format!("{} LTP", call),
        format!("{} LTP", put),
        format!("{} Chg OI", put),
        format!("{} OI", put),
    ]
}

/// Fixed-width strike table, ascending by strike
///
/// The row at `atm` (if any) is flagged with `*`.
pub fn render_table(snapshot: &ChainSnapshot, atm: Option<f64>) -> String {
    let mut out = String::new();
    let headers = headers();

    let _ = write!(out, "  ");
    for h in &headers {
        let _ = write!(out, "{:>w$}", h, w = WIDTH);
    }
    out.push('\n');
    let _ = writeln!(out, "  {}", "-".repeat(WIDTH * headers.len()));

    for row in snapshot.rows() {
        let marker = if atm == Some(row.strike) { '*' } else { ' ' };
        let call = row.side(OptionSide::Call);
        let put = row.side(OptionSide::Put);
        let _ = writeln!(
            out,
            "{} {:>w$.2}{:>w$}{:>w$}{:>w$.2}{:>w$.2}{:>w$}{:>w$}",
            marker,
            row.strike,
            call.open_interest,
            call.change_in_oi,
            call.last_price,
            put.last_price,
            put.change_in_oi,
            put.open_interest,
            w = WIDTH,
        );
    }

    out
}

/// Summary lines followed by OI totals
pub fn render_summary(summary: &ChainSummary) -> String {
    format!(
        "{}\nCall OI total:   {}\nPut OI total:    {}\n",
        summary, summary.totals.call, summary.totals.put
    )
}
