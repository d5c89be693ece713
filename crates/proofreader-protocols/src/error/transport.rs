//! Page transport errors.

use thiserror::Error;

/// Failure reported while sending a message into a page context.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The platform reported an error for a completed send attempt.
    #[error("{0}")]
    Runtime(String),

    /// The send attempt itself raised.
    #[error("Exception while sending: {0}")]
    Exception(String),
}

impl TransportError {
    /// Raw platform text, used for receiver classification.
    pub fn message(&self) -> &str {
        match self {
            TransportError::Runtime(message) | TransportError::Exception(message) => message,
        }
    }
}
