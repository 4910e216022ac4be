//! Error types shared across the ZigZag runtime.

use thiserror::Error;

/// Unified error type for runtime operations.
#[derive(Debug, Error)]
pub enum ZigzagError {
    /// Topic creation or message transport failed
    #[error("communication error: {0}")]
    Communication(String),

    /// A topic name was reused with a different message type
    #[error("topic '{0}' already exists with a different message type")]
    TopicTypeMismatch(String),

    /// Caller passed something the runtime cannot act on
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or validated
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for internal runtime failures
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the runtime.
pub type ZigzagResult<T> = Result<T, ZigzagError>;
