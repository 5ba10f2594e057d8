//! Feed payload → ChainSnapshot

use crate::core::{ChainError, ChainResult, ChainSnapshot, StrikeRow};
use crate::data::FeedPayload;

/// Extract the rows for one expiry from a feed payload
///
/// Records with neither a call nor a put side are dropped. A missing side
/// reads as zeros. The result may be empty; analytics on an empty snapshot
/// report `EmptyChain`.
pub fn normalize(payload: &FeedPayload, expiry: &str) -> ChainResult<ChainSnapshot> {
    if !payload.has_expiry(expiry) {
        return Err(ChainError::InvalidExpiry(expiry.to_string()));
    }

    let mut skipped = 0usize;
    let rows: Vec<StrikeRow> = payload
        .records
        .data
        .iter()
        .filter(|r| r.expiry_date == expiry)
        .filter_map(|r| {
            if r.call.is_none() && r.put.is_none() {
                skipped += 1;
                return None;
            }
            Some(StrikeRow::from_sides(
                r.strike_price,
                r.call.map(Into::into),
                r.put.map(Into::into),
            ))
        })
        .collect();

    if skipped > 0 {
        tracing::warn!("Dropped {} records with no call or put side for {}", skipped, expiry);
    }

    let snapshot = ChainSnapshot::new(expiry, payload.underlying_value(), rows)?
        .with_timestamp(payload.records.timestamp.clone());

    tracing::debug!("Normalized {} strikes for expiry {}", snapshot.len(), expiry);
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FeedRecord, FeedRecords, SideQuote};

    fn side(oi: u64) -> Option<SideQuote> {
        Some(SideQuote {
            open_interest: oi,
            change_in_oi: 0,
            last_price: 1.0,
        })
    }

    fn record(strike: f64, expiry: &str, call: Option<SideQuote>, put: Option<SideQuote>) -> FeedRecord {
        FeedRecord {
            strike_price: strike,
            expiry_date: expiry.to_string(),
            call,
            put,
        }
    }

    fn payload(data: Vec<FeedRecord>) -> FeedPayload {
        FeedPayload {
            records: FeedRecords {
                expiry_dates: vec!["E1".to_string(), "E2".to_string()],
                data,
                underlying_value: 104.0,
                timestamp: Some("now".to_string()),
            },
        }
    }

    #[test]
    fn test_filters_by_expiry_and_sides() {
        let p = payload(vec![
            record(110.0, "E1", side(800), side(400)),
            record(120.0, "E1", None, None),
            record(100.0, "E1", side(500), None),
            record(105.0, "E2", side(1), side(1)),
        ]);

        let snap = normalize(&p, "E1").unwrap();
        assert_eq!(snap.strikes(), vec![100.0, 110.0]);
        assert_eq!(snap.row_at(100.0).unwrap().put_open_interest, 0);
        assert_eq!(snap.timestamp(), Some("now"));
        assert_eq!(snap.underlying_price(), 104.0);
    }

    #[test]
    fn test_put_only_record_is_kept() {
        let p = payload(vec![record(100.0, "E1", None, side(700))]);
        let snap = normalize(&p, "E1").unwrap();
        let row = snap.row_at(100.0).unwrap();
        assert_eq!(row.call_open_interest, 0);
        assert_eq!(row.put_open_interest, 700);
    }

    #[test]
    fn test_unknown_expiry() {
        let p = payload(vec![record(100.0, "E1", side(1), side(1))]);
        assert!(matches!(
            normalize(&p, "nonexistent-expiry"),
            Err(ChainError::InvalidExpiry(e)) if e == "nonexistent-expiry"
        ));
    }

    #[test]
    fn test_listed_expiry_without_records_is_empty() {
        let p = payload(vec![record(100.0, "E1", side(1), side(1))]);
        let snap = normalize(&p, "E2").unwrap();
        assert!(snap.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let p = payload(vec![
            record(110.0, "E1", side(800), side(400)),
            record(100.0, "E1", side(500), side(1000)),
        ]);
        assert_eq!(normalize(&p, "E1").unwrap(), normalize(&p, "E1").unwrap());
    }
}
