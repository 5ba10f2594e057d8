//! Option chain analytics
//!
//! Pure functions over a single-expiry snapshot:
//! 1. **Normalization**: feed payload → sorted, unique strike rows
//! 2. **ATM strike**: strike nearest the underlying, lower strike on ties
//! 3. **Max pain**: strike minimising OI-weighted distance to all strikes
//! 4. **Put/call ratio**: total put OI over total call OI
//!
//! None of these substitute a default for an undefined result. Empty chains
//! and zero call OI come back as errors so the caller can show "N/A".

mod atm;
mod max_pain;
mod normalize;
mod pcr;
mod summary;

pub use atm::*;
pub use max_pain::*;
pub use normalize::*;
pub use pcr::*;
pub use summary::*;
