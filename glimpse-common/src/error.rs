//! Common error types for Glimpse

use thiserror::Error;

/// Common result type for Glimpse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Glimpse service
///
/// Every variant is local and recoverable: none is fatal to the process.
/// Callers return the error to the immediate caller, which is responsible
/// for user-visible messaging.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested facility or beacon request not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Blank message or item where text is required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Status string outside the four-value facility status enum
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// External vision service failure or malformed/out-of-range response
    #[error("Inference unavailable: {0}")]
    InferenceUnavailable(String),

    /// Admin secret mismatch
    #[error("Unauthorized")]
    Unauthorized,

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
