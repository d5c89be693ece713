//! Pipeline failure taxonomy.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::StorageError;

/// Every way a proofread operation can fail.
///
/// Each component fails with exactly one of these; the `Display` text is the
/// message shown to the user and recorded as the last error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProofreadError {
    #[error("No API key found. Please enter your OpenAI API key in the extension settings.")]
    MissingCredential,

    #[error("No text selected. Highlight the text you want to proofread and try again.")]
    EmptySelection,

    #[error("OpenAI API Error: request timed out after {0} ms")]
    Timeout(u64),

    #[error("OpenAI API Error: {0}")]
    RateLimited(String),

    #[error("OpenAI API Error: {0}")]
    RemoteRejected(String),

    #[error("OpenAI API Error: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to access extension storage: {0}")]
    StorageUnavailable(String),

    #[error("Unable to reach the page: {0}")]
    DeliveryUnreachable(String),

    #[error("Could not locate the original selection. The content may have changed.")]
    ReplacementConflict,
}

/// Discriminant of [`ProofreadError`], for branching without matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    MissingCredential,
    EmptySelection,
    Timeout,
    RateLimited,
    RemoteRejected,
    MalformedResponse,
    Network,
    StorageUnavailable,
    DeliveryUnreachable,
    ReplacementConflict,
}

impl ProofreadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProofreadError::MissingCredential => ErrorKind::MissingCredential,
            ProofreadError::EmptySelection => ErrorKind::EmptySelection,
            ProofreadError::Timeout(_) => ErrorKind::Timeout,
            ProofreadError::RateLimited(_) => ErrorKind::RateLimited,
            ProofreadError::RemoteRejected(_) => ErrorKind::RemoteRejected,
            ProofreadError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            ProofreadError::Network(_) => ErrorKind::Network,
            ProofreadError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            ProofreadError::DeliveryUnreachable(_) => ErrorKind::DeliveryUnreachable,
            ProofreadError::ReplacementConflict => ErrorKind::ReplacementConflict,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingCredential => "missing-credential",
            ErrorKind::EmptySelection => "empty-selection",
            ErrorKind::Timeout => "timeout",
            ErrorKind::RateLimited => "rate-limited",
            ErrorKind::RemoteRejected => "remote-rejected",
            ErrorKind::MalformedResponse => "malformed-response",
            ErrorKind::Network => "network",
            ErrorKind::StorageUnavailable => "storage-unavailable",
            ErrorKind::DeliveryUnreachable => "delivery-unreachable",
            ErrorKind::ReplacementConflict => "replacement-conflict",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StorageError> for ProofreadError {
    fn from(err: StorageError) -> Self {
        ProofreadError::StorageUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message() {
        let err = ProofreadError::MissingCredential;
        assert!(err.to_string().contains("No API key found"));
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
    }

    #[test]
    fn test_remote_messages_carry_server_text() {
        let err = ProofreadError::RemoteRejected("Invalid API key".to_string());
        assert_eq!(err.to_string(), "OpenAI API Error: Invalid API key");

        let err = ProofreadError::RateLimited("Rate limit reached".to_string());
        assert!(err.to_string().contains("Rate limit reached"));
        assert_eq!(err.kind(), ErrorKind::RateLimited);
    }

    #[test]
    fn test_timeout_message() {
        let err = ProofreadError::Timeout(15_000);
        assert!(err.to_string().contains("15000"));
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: ProofreadError = StorageError::Unavailable("quota".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
        assert!(err.to_string().contains("quota"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::ReplacementConflict.to_string(), "replacement-conflict");
        assert_eq!(
            serde_json::to_value(ErrorKind::DeliveryUnreachable).unwrap(),
            "delivery-unreachable"
        );
    }

    #[test]
    fn test_all_variants_display() {
        let errors = vec![
            ProofreadError::MissingCredential,
            ProofreadError::EmptySelection,
            ProofreadError::Timeout(1),
            ProofreadError::RateLimited("a".to_string()),
            ProofreadError::RemoteRejected("b".to_string()),
            ProofreadError::MalformedResponse("c".to_string()),
            ProofreadError::Network("d".to_string()),
            ProofreadError::StorageUnavailable("e".to_string()),
            ProofreadError::DeliveryUnreachable("f".to_string()),
            ProofreadError::ReplacementConflict,
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
            assert!(!err.kind().as_str().is_empty());
        }
    }
}
