//! `settings` subcommand handlers.

use proofreader_protocols::SettingsStore;
use proofreader_protocols::settings::{
    clear_last_error, save_api_key, save_debug_enabled, save_tone,
};
use proofreader_runtime::snapshot;

use crate::cli::SettingsAction;

/// Handle settings subcommands.
pub(crate) async fn handle_settings_command(
    store: &dyn SettingsStore,
    action: SettingsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SettingsAction::Show => {
            println!("{}", snapshot(store).await?);
        }
        SettingsAction::SetKey { key } => {
            save_api_key(store, &key).await?;
            println!("API key saved.");
        }
        SettingsAction::SetTone { tone } => {
            save_tone(store, tone).await?;
            println!("Tone set to {}.", tone);
        }
        SettingsAction::SetDebug { enabled } => {
            save_debug_enabled(store, enabled).await?;
            println!("Debug logging {}.", if enabled { "enabled" } else { "disabled" });
        }
        SettingsAction::ClearError => {
            clear_last_error(store).await?;
            println!("Last error cleared.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use proofreader_config::FileSettingsStore;
    use proofreader_protocols::Tone;
    use proofreader_protocols::settings::load_settings;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_settings_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"));

        handle_settings_command(&store, SettingsAction::SetKey { key: "  sk-abc  ".into() })
            .await
            .unwrap();
        handle_settings_command(&store, SettingsAction::SetTone { tone: Tone::Formal })
            .await
            .unwrap();
        handle_settings_command(&store, SettingsAction::SetDebug { enabled: true })
            .await
            .unwrap();

        let settings = load_settings(&store).await.unwrap();
        assert_eq!(settings.api_key(), Some("sk-abc"));
        assert_eq!(settings.tone, Tone::Formal);
        assert!(settings.debug_enabled);
    }

    #[tokio::test]
    async fn test_blank_key_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"));
        let err = handle_settings_command(&store, SettingsAction::SetKey { key: "   ".into() })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Please enter a valid API Key."));
    }
}
