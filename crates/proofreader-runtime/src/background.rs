//! Background-side message router and initiator entry points.

use std::sync::Arc;

use proofreader_protocols::{
    BackgroundMessage, BackgroundResponse, BadgeState, FallbackIndicator, PageMessage,
    ProofreadError, TabId,
};
use tracing::{debug, info};

use crate::orchestrator::{Orchestrator, RunOptions};

pub const STORAGE_BADGE_TEXT: &str = "ERR";
pub const STORAGE_BADGE_TITLE: &str = "GPT Proofreader: storage error";

pub struct BackgroundRouter {
    orchestrator: Arc<Orchestrator>,
    indicator: Arc<dyn FallbackIndicator>,
}

impl BackgroundRouter {
    pub fn new(orchestrator: Arc<Orchestrator>, indicator: Arc<dyn FallbackIndicator>) -> Self {
        Self {
            orchestrator,
            indicator,
        }
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    /// Context-menu action: proofread the menu's selection text, notifying the page on failure.
    pub async fn on_context_menu(&self, selection_text: &str, tab: Option<TabId>) -> Result<String, ProofreadError> {
        info!(tab = ?tab, "context menu proofread");
        self.orchestrator
            .run_proofread(selection_text, tab, RunOptions::default())
            .await
    }

    pub async fn handle(&self, message: BackgroundMessage) -> BackgroundResponse {
        match message {
            BackgroundMessage::StorageBadge { state } => {
                debug!(?state, "storage badge update");
                match state {
                    BadgeState::Error => self.indicator.show(STORAGE_BADGE_TEXT, STORAGE_BADGE_TITLE),
                    BadgeState::Clear => self.indicator.clear(),
                }
                BackgroundResponse::ok()
            }
            BackgroundMessage::DebugSelfTest => BackgroundResponse::ok(),
            BackgroundMessage::ProofreadSelection { tab_id } => match self.proofread_selection(tab_id).await {
                Ok(text) => BackgroundResponse::with_text(text),
                Err(err) => BackgroundResponse::error(err.to_string()),
            },
        }
    }

    /// Popup action: ask the page for its selection, then proofread it without page notices.
    async fn proofread_selection(&self, tab: Option<TabId>) -> Result<String, ProofreadError> {
        let delivery = self.orchestrator.delivery();
        let outcome = delivery.deliver(tab, &PageMessage::selection_request(false)).await;
        if !outcome.ok {
            return Err(delivery.unreachable(outcome).await);
        }

        // An empty selection still runs the flow so the failure is recorded.
        let selected = outcome
            .response
            .and_then(|r| r.text)
            .unwrap_or_default();
        self.orchestrator
            .run_proofread(&selected, tab, RunOptions { notify_errors: false })
            .await
    }
}
