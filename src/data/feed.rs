//! Exchange option chain payload
//!
//! Mirrors the JSON returned by the NSE option chain endpoints. Only the
//! fields the analytics need are modelled; everything else is ignored.
//!
//! Numeric fields are decoded leniently: integers, floats, numeric strings
//! and nulls are all accepted, and a missing or null value reads as zero.
//! Values that cannot be a price or a contract count (NaN, infinities,
//! negative premiums, fractional or out-of-range counts) are rejected.

use chrono::NaiveDate;
use serde::de::{Error as DeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

use crate::core::{ChainError, ChainResult, SideFigures};

/// Root payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPayload {
    pub records: FeedRecords,
}

/// The `records` block: every expiry, every strike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecords {
    #[serde(rename = "expiryDates", default)]
    pub expiry_dates: Vec<String>,
    #[serde(default)]
    pub data: Vec<FeedRecord>,
    #[serde(rename = "underlyingValue", deserialize_with = "de_price")]
    pub underlying_value: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One (strike, expiry) pair with optional call and put sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    #[serde(rename = "strikePrice", deserialize_with = "de_price")]
    pub strike_price: f64,
    #[serde(rename = "expiryDate")]
    pub expiry_date: String,
    #[serde(rename = "CE", default, skip_serializing_if = "Option::is_none")]
    pub call: Option<SideQuote>,
    #[serde(rename = "PE", default, skip_serializing_if = "Option::is_none")]
    pub put: Option<SideQuote>,
}

/// Call or put quote inside a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideQuote {
    #[serde(rename = "openInterest", default, deserialize_with = "de_count")]
    pub open_interest: u64,
    #[serde(rename = "changeinOpenInterest", default, deserialize_with = "de_signed")]
    pub change_in_oi: i64,
    #[serde(rename = "lastPrice", default, deserialize_with = "de_premium")]
    pub last_price: f64,
}

impl From<SideQuote> for SideFigures {
    fn from(q: SideQuote) -> Self {
        SideFigures {
            open_interest: q.open_interest,
            change_in_oi: q.change_in_oi,
            last_price: q.last_price,
        }
    }
}

impl FeedPayload {
    pub fn from_json_str(json: &str) -> ChainResult<Self> {
        serde_json::from_str(json).map_err(|e| ChainError::data(format!("Failed to parse feed: {}", e)))
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> ChainResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| ChainError::data(format!("Failed to parse feed: {}", e)))
    }

    /// Load a payload previously saved to disk
    pub fn from_file(path: impl AsRef<Path>) -> ChainResult<Self> {
        let buf = std::fs::read(path)?;
        serde_json::from_slice(&buf)
            .map_err(|e| ChainError::data(format!("Failed to parse feed: {}", e)))
    }

    pub fn underlying_value(&self) -> f64 {
        self.records.underlying_value
    }

    /// Expiry identifiers in feed order
    pub fn expiries(&self) -> &[String] {
        &self.records.expiry_dates
    }

    pub fn has_expiry(&self, expiry: &str) -> bool {
        self.records.expiry_dates.iter().any(|e| e == expiry)
    }
}

/// Parse an exchange expiry identifier such as `28-Nov-2024`
pub fn parse_expiry(id: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(id.trim(), "%d-%b-%Y").ok()
}

fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("number or numeric string")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            let v = v.trim();
            if v.is_empty() || v == "-" {
                return Ok(0.0);
            }
            v.replace(',', "").parse::<f64>().map_err(DeError::custom)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(0.0)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(0.0)
        }
    }

    let v = deserializer.deserialize_any(PriceVisitor)?;
    if !v.is_finite() {
        return Err(DeError::custom(format!("non-finite number {}", v)));
    }
    Ok(v)
}

fn de_premium<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = de_price(deserializer)?;
    if v < 0.0 {
        return Err(DeError::custom(format!("last price must be non-negative, got {}", v)));
    }
    Ok(v)
}

// 2^63; every f64 below this fits in an i64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn de_signed<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = de_price(deserializer)?;
    if v.fract() != 0.0 {
        return Err(DeError::custom(format!("contract count must be whole, got {}", v)));
    }
    if v < -I64_BOUND || v >= I64_BOUND {
        return Err(DeError::custom(format!("contract count out of range: {}", v)));
    }
    Ok(v as i64)
}

fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = de_signed(deserializer)?;
    u64::try_from(v).map_err(|_| DeError::custom(format!("open interest must be non-negative, got {}", v)))
}
