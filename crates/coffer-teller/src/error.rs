//! Error types for the Coffer teller

use thiserror::Error;

/// Result type alias for teller operations
pub type Result<T> = std::result::Result<T, TellerError>;

/// Errors that can occur in teller operations
#[derive(Debug, Error)]
pub enum TellerError {
    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] coffer_core::CofferError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Username already present in the store
    #[error("Account already exists: {0}")]
    AccountExists(String),

    /// Username not present in the store
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account is locked; authentication is rejected without consuming a try
    #[error("Account is locked: {0}")]
    Locked(String),

    /// Wrong PIN submitted
    #[error("Incorrect PIN ({0} attempts remaining)")]
    IncorrectPin(u32),

    /// Withdrawal larger than the current balance
    #[error("Insufficient funds")]
    InsufficientFunds,
}

impl From<serde_json::Error> for TellerError {
    fn from(e: serde_json::Error) -> Self {
        TellerError::Config(e.to_string())
    }
}
