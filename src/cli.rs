//! CLI definitions for the proofreader.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use proofreader_protocols::Tone;

/// Proofreader CLI.
#[derive(Parser)]
#[command(name = "proofreader")]
#[command(about = "Proofread selected text with a chat-completion model and replace it in place")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Proofread text in a scratch page and print the result
    Proofread {
        /// Text loaded into the scratch text field
        #[arg(long)]
        text: String,

        /// Character range to select, as START:END (default: all of the text)
        #[arg(long, value_parser = parse_span)]
        select: Option<(usize, usize)>,

        /// Tone to store before running (formal, neutral, friendly)
        #[arg(long)]
        tone: Option<Tone>,
    },

    /// Read or change persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Storage snapshot, self-tests, and a content-script ping
    Debug,
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Show settings with the API key masked
    Show,

    /// Store the OpenAI API key
    SetKey {
        /// API key
        key: String,
    },

    /// Store the tone preference
    SetTone {
        /// formal, neutral, or friendly
        tone: Tone,
    },

    /// Enable or disable debug logging
    SetDebug {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Forget the last recorded error
    ClearError,
}

/// Parse `START:END` char offsets.
pub(crate) fn parse_span(value: &str) -> Result<(usize, usize), String> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", value))?;
    let start: usize = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid start '{}': {}", start, e))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid end '{}': {}", end, e))?;
    if end < start {
        return Err(format!("end {} is before start {}", end, start));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_span() {
        assert_eq!(parse_span("4:9"), Ok((4, 9)));
        assert_eq!(parse_span(" 0 : 3 "), Ok((0, 3)));
        assert!(parse_span("9:4").is_err());
        assert!(parse_span("nine").is_err());
    }

    #[test]
    fn test_parse_proofread_command() {
        let cli = Cli::try_parse_from([
            "proofreader",
            "proofread",
            "--text",
            "teh cat",
            "--select",
            "0:3",
            "--tone",
            "Friendly",
        ])
        .unwrap();
        match cli.command {
            Commands::Proofread { text, select, tone } => {
                assert_eq!(text, "teh cat");
                assert_eq!(select, Some((0, 3)));
                assert_eq!(tone, Some(Tone::Friendly));
            }
            _ => panic!("expected proofread"),
        }
    }

    #[test]
    fn test_parse_settings_command() {
        let cli = Cli::try_parse_from(["proofreader", "settings", "set-debug", "true"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Settings {
                action: SettingsAction::SetDebug { enabled: true }
            }
        ));
    }
}
