//! Data fetching and storage
//!
//! Handles:
//! - Exchange payload model and lenient decoding
//! - NSE public option chain API
//! - Short-lived local caching of raw responses

pub mod cache;
pub mod feed;
pub mod nse;

pub use cache::*;
pub use feed::*;
pub use nse::*;
