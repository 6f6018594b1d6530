use std::result::Result as StdResult;

use thiserror::Error;

/// Error type for the configuration and export layers.
///
/// Store and record operations never fail; only I/O and JSON handling surface errors.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, ExpenseError>;
