//! Delivery seams: page transport, fallback indicator, and the outcome type.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::TransportError;
use crate::message::{PageMessage, PageResponse};
use crate::types::TabId;

/// Why a delivery attempt did or did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryReason {
    None,
    InvalidTarget,
    NoReceiver,
    SendError,
    Exception,
}

impl DeliveryReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryReason::None => "none",
            DeliveryReason::InvalidTarget => "invalid-target",
            DeliveryReason::NoReceiver => "no-receiver",
            DeliveryReason::SendError => "send-error",
            DeliveryReason::Exception => "exception",
        }
    }
}

/// Result of one delivery attempt. Never an error: callers branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    pub ok: bool,
    pub reason: DeliveryReason,
    /// Platform error text for failed attempts.
    #[serde(skip)]
    pub error: Option<String>,
    /// Reply from the page for successful attempts.
    #[serde(skip)]
    pub response: Option<PageResponse>,
}

impl DeliveryOutcome {
    pub fn delivered(response: PageResponse) -> Self {
        Self {
            ok: true,
            reason: DeliveryReason::None,
            error: None,
            response: Some(response),
        }
    }

    pub fn failed(reason: DeliveryReason, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason,
            error: Some(error.into()),
            response: None,
        }
    }

    /// Whether the page replied `{ok: true}`.
    pub fn acknowledged(&self) -> bool {
        self.response.as_ref().is_some_and(PageResponse::is_ok)
    }
}

/// Sends messages into page contexts (tabs).
#[async_trait]
pub trait PageTransport: Send + Sync {
    async fn send(&self, tab: TabId, message: &PageMessage) -> Result<PageResponse, TransportError>;
}

/// Visible signal used when in-page notification is impossible.
pub trait FallbackIndicator: Send + Sync {
    /// Show the badge text with a hover title.
    fn show(&self, text: &str, title: &str);

    /// Remove any badge and restore the default title.
    fn clear(&self);
}
