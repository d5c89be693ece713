//! Cross-context message protocol.
//!
//! Messages sent from the background side into a page are either typed
//! commands (tagged with `type`) or plain `{message}` notices. Messages sent
//! to the background side (from the popup or options page) are
//! [`BackgroundMessage`]s.

use serde::{Deserialize, Serialize};

use crate::types::TabId;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// Typed command understood by the content script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PageCommand {
    /// Replace the captured selection with the corrected text.
    #[serde(rename = "gptProofreadResult", rename_all = "camelCase")]
    ProofreadResult {
        proofread_text: String,
        original_text: String,
    },

    /// Capture and report the current selection.
    #[serde(rename = "gptProofreadSelectionRequest", rename_all = "camelCase")]
    SelectionRequest {
        #[serde(default)]
        notify_on_empty: bool,
    },

    /// Liveness check.
    #[serde(rename = "gptProofreaderPing")]
    Ping,
}

/// Anything that can be delivered into a page context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageMessage {
    Command(PageCommand),
    /// User-visible notice.
    Notice { message: String },
}

impl PageMessage {
    pub fn proofread_result(proofread_text: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self::Command(PageCommand::ProofreadResult {
            proofread_text: proofread_text.into(),
            original_text: original_text.into(),
        })
    }

    pub fn selection_request(notify_on_empty: bool) -> Self {
        Self::Command(PageCommand::SelectionRequest { notify_on_empty })
    }

    pub fn ping() -> Self {
        Self::Command(PageCommand::Ping)
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice {
            message: message.into(),
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            PageMessage::Command(PageCommand::ProofreadResult { .. }) => "gptProofreadResult",
            PageMessage::Command(PageCommand::SelectionRequest { .. }) => "gptProofreadSelectionRequest",
            PageMessage::Command(PageCommand::Ping) => "gptProofreaderPing",
            PageMessage::Notice { .. } => "notice",
        }
    }
}

/// Reply from the content script. Fields absent on the wire stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PageResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ok(ok: bool) -> Self {
        Self {
            ok: Some(ok),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            ok: None,
            text: Some(text.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok == Some(true)
    }
}

/// Badge state requested by the settings surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeState {
    Error,
    Clear,
}

/// Message addressed to the background side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BackgroundMessage {
    #[serde(rename = "storageBadge")]
    StorageBadge { state: BadgeState },

    #[serde(rename = "debugSelfTest")]
    DebugSelfTest,

    /// Popup action: proofread whatever is selected in the tab.
    #[serde(rename = "proofreadSelection", rename_all = "camelCase")]
    ProofreadSelection {
        #[serde(default)]
        tab_id: Option<TabId>,
    },
}

/// Reply from the background side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BackgroundResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: Some(text.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: None,
            error: Some(error.into()),
        }
    }
}
