//! Rewrite request and the rewriter seam.

use async_trait::async_trait;

use crate::error::ProofreadError;
use crate::types::Tone;

/// Text to proofread plus the requested tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
    pub original_text: String,
    pub tone: Tone,
}

impl RewriteRequest {
    /// Fails with [`ProofreadError::EmptySelection`] when the text is blank.
    pub fn new(original_text: impl Into<String>, tone: Tone) -> Result<Self, ProofreadError> {
        let original_text = original_text.into();
        if original_text.trim().is_empty() {
            return Err(ProofreadError::EmptySelection);
        }
        Ok(Self { original_text, tone })
    }
}

/// Corrected text, or the reason there is none.
pub type RewriteResult = Result<String, ProofreadError>;

/// Remote rewriting backend.
#[async_trait]
pub trait Rewriter: Send + Sync {
    /// Rewrite `request.original_text`. `api_key` is non-empty.
    async fn rewrite(&self, request: &RewriteRequest, api_key: &str) -> RewriteResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_blank_text() {
        let err = RewriteRequest::new("   \n", Tone::Formal).unwrap_err();
        assert_eq!(err, ProofreadError::EmptySelection);
    }

    #[test]
    fn test_request_keeps_text_verbatim() {
        let request = RewriteRequest::new("  teh cat ", Tone::Friendly).unwrap();
        assert_eq!(request.original_text, "  teh cat ");
        assert_eq!(request.tone, Tone::Friendly);
    }
}
