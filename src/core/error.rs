//! Error types for option chain analytics

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Invalid expiry: {0} is not listed by the feed")]
    InvalidExpiry(String),

    #[error("Empty chain: no strikes to analyse")]
    EmptyChain,

    #[error("Degenerate ratio: total call open interest is zero")]
    DegenerateRatio,

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type ChainResult<T> = Result<T, ChainError>;

impl ChainError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn fetch_failed(msg: impl Into<String>) -> Self {
        Self::FetchFailed(msg.into())
    }

    /// Kernel outcomes a caller should render as "N/A" rather than abort on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ChainError::InvalidExpiry(_) | ChainError::EmptyChain | ChainError::DegenerateRatio
        )
    }
}
