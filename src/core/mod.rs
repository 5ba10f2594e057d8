//! Core data types for option chain analytics
//!
//! Defines fundamental types:
//! - StrikeRow: call/put open interest, OI change and premium at one strike
//! - ChainSnapshot: sorted, unique strike rows for one expiry
//! - ChainError: error kinds surfaced to callers

pub mod error;
pub mod row;
pub mod snapshot;

pub use error::*;
pub use row::*;
pub use snapshot::*;
