//! Coalescing of correction spans before they are rendered as a diff.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorrectionError {
    #[error("Correction end ({end}) must be greater than or equal to start ({start})")]
    InvalidRange { start: usize, end: usize },
}

/// Replace chars `[start, end)` of the original text with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    start: usize,
    end: usize,
    replacement: String,
}

impl Correction {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Result<Self, CorrectionError> {
        if end < start {
            return Err(CorrectionError::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            end,
            replacement: replacement.into(),
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Merge overlapping or touching corrections, ordered by `(start, end)`.
///
/// A merged replacement keeps the part of the earlier replacement that lies
/// before the later span and the part that lies past its end, each clamped
/// to the characters the earlier replacement actually has.
pub fn merge_corrections(corrections: impl IntoIterator<Item = Correction>) -> Vec<Correction> {
    let mut sorted: Vec<Correction> = corrections.into_iter().collect();
    sorted.sort_by_key(|c| (c.start, c.end));

    let mut merged: Vec<Correction> = Vec::with_capacity(sorted.len());
    for current in sorted {
        if let Some(previous) = merged.last_mut().filter(|p| current.start <= p.end) {
            let previous_chars: Vec<char> = previous.replacement.chars().collect();

            let prefix_len = (current.start - previous.start).min(previous_chars.len());
            let suffix_span = previous.end.saturating_sub(current.end);
            let suffix_len = suffix_span.min(previous_chars.len() - prefix_len);

            let mut replacement: String = previous_chars[..prefix_len].iter().collect();
            replacement.push_str(&current.replacement);
            replacement.extend(&previous_chars[previous_chars.len() - suffix_len..]);

            previous.end = previous.end.max(current.end);
            previous.replacement = replacement;
            continue;
        }
        merged.push(current);
    }
    merged
}
