//! Debug console: storage snapshot, content-script ping, self-test.

use std::fmt;

use chrono::{DateTime, Utc};
use proofreader_page_content::{SELF_TEST_SAMPLE, run_local_replacement_check};
use proofreader_protocols::settings::load_settings;
use proofreader_protocols::{
    BackgroundMessage, LastError, PageMessage, PageTransport, SettingsStore, StorageError, TabId,
    Tone,
};
use serde::Serialize;
use tracing::debug;

use crate::background::BackgroundRouter;

pub const NO_ERRORS: &str = "No errors recorded";

/// Show only the ends of an API key.
pub fn mask_key(key: Option<&str>) -> String {
    let Some(key) = key.filter(|k| !k.is_empty()) else {
        return "(none)".to_string();
    };
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "••••".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", prefix, suffix)
}

fn format_timestamp(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "time unknown".to_string(),
    }
}

fn describe_last_error(last_error: Option<&LastError>) -> String {
    match last_error {
        Some(e) => format!("{} ({})", e.message, format_timestamp(e.at)),
        None => NO_ERRORS.to_string(),
    }
}

/// Settings as shown in the debug console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageSnapshot {
    pub api_key: String,
    pub tone: Tone,
    pub debug_enabled: bool,
    pub last_error: String,
}

impl fmt::Display for StorageSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "API key:    {}", self.api_key)?;
        writeln!(f, "Tone:       {}", self.tone)?;
        writeln!(
            f,
            "Debug:      {}",
            if self.debug_enabled { "Enabled" } else { "Disabled" }
        )?;
        write!(f, "Last error: {}", self.last_error)
    }
}

pub async fn snapshot(store: &dyn SettingsStore) -> Result<StorageSnapshot, StorageError> {
    let settings = load_settings(store).await?;
    Ok(StorageSnapshot {
        api_key: mask_key(settings.api_key()),
        tone: settings.tone,
        debug_enabled: settings.debug_enabled,
        last_error: describe_last_error(settings.last_error.as_ref()),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingStatus {
    pub ok: bool,
    pub message: String,
}

/// Ask the content script in `tab` whether it is alive. Goes straight to the
/// transport so a failed ping does not raise the fallback badge.
pub async fn ping(transport: &dyn PageTransport, tab: Option<TabId>) -> PingStatus {
    let Some(tab) = tab else {
        return PingStatus {
            ok: false,
            message: "No active tab detected".to_string(),
        };
    };
    match transport.send(tab, &PageMessage::ping()).await {
        Ok(response) if response.is_ok() => PingStatus {
            ok: true,
            message: "Content script responded ✓".to_string(),
        },
        Ok(_) => PingStatus {
            ok: false,
            message: "No response from content script".to_string(),
        },
        Err(e) => {
            debug!(tab, error = %e, "ping failed");
            PingStatus {
                ok: false,
                message: e.to_string(),
            }
        }
    }
}

/// Local replacement check followed by a background round trip.
pub async fn run_self_test(router: &BackgroundRouter) -> Result<String, String> {
    run_local_replacement_check(SELF_TEST_SAMPLE).map_err(|e| e.to_string())?;

    let response = router.handle(BackgroundMessage::DebugSelfTest).await;
    if response.ok {
        Ok("Self-test passed: background responded ✓".to_string())
    } else {
        Err(response
            .error
            .unwrap_or_else(|| "Self-test failed: no background response.".to_string()))
    }
}
