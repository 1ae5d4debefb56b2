//! Stock client error types.

use thiserror::Error;

/// Result type for stock-footage operations.
pub type StockResult<T> = Result<T, StockError>;

/// Errors that can occur talking to the stock-footage service.
#[derive(Debug, Error)]
pub enum StockError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Stock search failed: {0}")]
    RequestFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StockError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }
}
