//! Example: Headline metrics from a saved option chain payload
//!
//! Run with: cargo run --example chain_summary

use chrono::NaiveDate;
use nifty_chain::prelude::*;

const PAYLOAD: &str = r#"
{
  "records": {
    "expiryDates": ["28-Nov-2024", "05-Dec-2024"],
    "timestamp": "22-Nov-2024 15:30:00",
    "underlyingValue": 23907.25,
    "data": [
      { "strikePrice": 23800, "expiryDate": "28-Nov-2024",
        "CE": { "openInterest": 41250, "changeinOpenInterest": -3100, "lastPrice": 212.4 },
        "PE": { "openInterest": 98400, "changeinOpenInterest": 12650, "lastPrice": 88.15 } },
      { "strikePrice": 23900, "expiryDate": "28-Nov-2024",
        "CE": { "openInterest": 76300, "changeinOpenInterest": 8800, "lastPrice": 145.5 },
        "PE": { "openInterest": 81200, "changeinOpenInterest": 15400, "lastPrice": 120.3 } },
      { "strikePrice": 24000, "expiryDate": "28-Nov-2024",
        "CE": { "openInterest": 132700, "changeinOpenInterest": 22150, "lastPrice": 91.0 },
        "PE": { "openInterest": 54900, "changeinOpenInterest": 2300, "lastPrice": 166.85 } },
      { "strikePrice": 24100, "expiryDate": "28-Nov-2024",
        "CE": { "openInterest": 88100, "changeinOpenInterest": 10400, "lastPrice": 52.6 } },
      { "strikePrice": 24000, "expiryDate": "05-Dec-2024",
        "CE": { "openInterest": 30100, "changeinOpenInterest": 4100, "lastPrice": 198.2 },
        "PE": { "openInterest": 12000, "changeinOpenInterest": 900, "lastPrice": 241.0 } }
    ]
  }
}"#;

fn main() -> ChainResult<()> {
    let payload = FeedPayload::from_json_str(PAYLOAD)?;
    let today = NaiveDate::from_ymd_opt(2024, 11, 22).unwrap_or_default();

    println!("=== Option Chain Summary ===\n");
    println!("Expiries: {}\n", payload.expiries().join(", "));

    for expiry in payload.expiries() {
        let snapshot = normalize(&payload, expiry)?;
        let summary = ChainSummary::compute(&snapshot, today);

        println!("{}", render_summary(&summary));
        print!("{}", render_table(&snapshot, summary.atm_strike));

        println!("\n--- Pain by strike ---");
        for point in pain_curve(&snapshot) {
            println!("  {:>9.2}  {:>16.0}", point.strike, point.pain);
        }
        println!();
    }

    Ok(())
}
