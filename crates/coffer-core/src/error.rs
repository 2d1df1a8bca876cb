//! Error types for the Coffer core library

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CofferError>;

/// Errors that can occur in core operations
#[derive(Debug, Error)]
pub enum CofferError {
    /// Candidate PIN has the wrong number of digits
    #[error("PIN must be {expected} digits")]
    WrongPinLength { expected: usize },

    /// Candidate PIN contains non-digit characters
    #[error("PIN must contain only digits")]
    InvalidPinFormat,

    /// Candidate PIN failed a strength check
    #[error("PIN is too weak: {0}")]
    WeakPin(&'static str),

    /// Obfuscation key must not be empty
    #[error("Obfuscation key must not be empty")]
    EmptyKey,

    /// Username violates record constraints
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Amount string does not parse as a non-negative 2-decimal value
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Persisted record line could not be decoded
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Generation gave up after the configured number of draws
    #[error("PIN generation exhausted after {0} attempts")]
    GenerationExhausted(u32),
}
