//! Common value types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Numeric identifier of a browser tab.
pub type TabId = i64;

/// Style instruction forwarded to the rewriting model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    #[default]
    Neutral,
    Friendly,
}

/// Error returned when a tone name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tone '{0}' (expected formal, neutral or friendly)")]
pub struct ParseToneError(pub String);

impl Tone {
    /// Persisted (lower-case) form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Neutral => "neutral",
            Tone::Friendly => "friendly",
        }
    }

    /// Parse a stored value, falling back to [`Tone::Neutral`] for anything unknown.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for Tone {
    type Err = ParseToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "formal" => Ok(Tone::Formal),
            "neutral" => Ok(Tone::Neutral),
            "friendly" => Ok(Tone::Friendly),
            _ => Err(ParseToneError(s.to_string())),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tone::Formal => "Formal",
            Tone::Neutral => "Neutral",
            Tone::Friendly => "Friendly",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_default_is_neutral() {
        assert_eq!(Tone::default(), Tone::Neutral);
    }

    #[test]
    fn test_tone_parse_case_insensitive() {
        assert_eq!("FORMAL".parse::<Tone>().unwrap(), Tone::Formal);
        assert_eq!("Friendly".parse::<Tone>().unwrap(), Tone::Friendly);
        assert_eq!(" neutral ".parse::<Tone>().unwrap(), Tone::Neutral);
    }

    #[test]
    fn test_tone_parse_unknown() {
        let err = "sarcastic".parse::<Tone>().unwrap_err();
        assert!(err.to_string().contains("sarcastic"));
    }

    #[test]
    fn test_tone_parse_lenient_defaults() {
        assert_eq!(Tone::parse_lenient("shouty"), Tone::Neutral);
        assert_eq!(Tone::parse_lenient(""), Tone::Neutral);
        assert_eq!(Tone::parse_lenient("Formal"), Tone::Formal);
    }

    #[test]
    fn test_tone_display_and_storage_form() {
        assert_eq!(Tone::Friendly.to_string(), "Friendly");
        assert_eq!(Tone::Friendly.as_str(), "friendly");
        assert_eq!(serde_json::to_value(Tone::Formal).unwrap(), "formal");
    }
}
