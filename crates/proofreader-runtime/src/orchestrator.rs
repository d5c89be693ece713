//! Proofread flow: settings, rewrite, replacement, reporting.
//!
//! Each invocation walks `Idle -> ReadingSettings -> Requesting -> Replacing`
//! and ends in `Done` or `Failed`. Nothing is kept between invocations, so
//! flows for different tabs run independently; two flows against the same
//! tab are only kept apart by the page's match-before-replace check.

use std::fmt;
use std::sync::Arc;

use proofreader_protocols::settings::{load_settings, record_last_error};
use proofreader_protocols::{
    ErrorKind, PageMessage, ProofreadError, RewriteRequest, Rewriter, SettingsStore, TabId,
};
use tracing::{debug, info, warn};

use crate::delivery::Delivery;

pub const EMPTY_RESULT_MESSAGE: &str = "Proofread failed without a specific error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowState {
    Idle,
    ReadingSettings,
    Requesting,
    Replacing,
    Done,
    Failed,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::Idle => "idle",
            FlowState::ReadingSettings => "reading-settings",
            FlowState::Requesting => "requesting",
            FlowState::Replacing => "replacing",
            FlowState::Done => "done",
            FlowState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Surface failures in the page. The popup turns this off to render errors inline.
    pub notify_errors: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            notify_errors: true,
        }
    }
}

/// Result of one flow plus every state it passed through.
#[derive(Debug, Clone)]
pub struct FlowReport {
    pub result: Result<String, ProofreadError>,
    pub states: Vec<FlowState>,
}

impl FlowReport {
    pub fn final_state(&self) -> FlowState {
        self.states.last().copied().unwrap_or(FlowState::Idle)
    }
}

/// Records transitions for one invocation.
struct Flow {
    tab: Option<TabId>,
    states: Vec<FlowState>,
}

impl Flow {
    fn start(tab: Option<TabId>) -> Self {
        Self {
            tab,
            states: vec![FlowState::Idle],
        }
    }

    fn enter(&mut self, next: FlowState) {
        let from = self.states.last().copied().unwrap_or(FlowState::Idle);
        debug!(tab = ?self.tab, %from, to = %next, "proofread transition");
        self.states.push(next);
    }

    fn state(&self) -> FlowState {
        self.states.last().copied().unwrap_or(FlowState::Idle)
    }
}

pub struct Orchestrator {
    settings: Arc<dyn SettingsStore>,
    rewriter: Arc<dyn Rewriter>,
    delivery: Arc<Delivery>,
}

impl Orchestrator {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        rewriter: Arc<dyn Rewriter>,
        delivery: Arc<Delivery>,
    ) -> Self {
        Self {
            settings,
            rewriter,
            delivery,
        }
    }

    pub fn delivery(&self) -> &Arc<Delivery> {
        &self.delivery
    }

    /// Proofread `selected_text` and replace it in `tab`. Resolves to the corrected text.
    pub async fn run_proofread(
        &self,
        selected_text: &str,
        tab: Option<TabId>,
        options: RunOptions,
    ) -> Result<String, ProofreadError> {
        self.run(selected_text, tab, options).await.result
    }

    /// Like [`run_proofread`](Self::run_proofread), also returning the visited states.
    pub async fn run(&self, selected_text: &str, tab: Option<TabId>, options: RunOptions) -> FlowReport {
        let mut flow = Flow::start(tab);
        let result = self.drive(&mut flow, selected_text, tab).await;

        match &result {
            Ok(_) => {
                flow.enter(FlowState::Done);
                info!(tab = ?tab, "proofread complete");
            }
            Err(err) => {
                let failed_in = flow.state();
                flow.enter(FlowState::Failed);
                warn!(tab = ?tab, state = %failed_in, kind = %err.kind(), error = %err, "proofread failed");
                self.report_failure(err, tab, options).await;
            }
        }

        FlowReport {
            result,
            states: flow.states,
        }
    }

    async fn drive(&self, flow: &mut Flow, selected_text: &str, tab: Option<TabId>) -> Result<String, ProofreadError> {
        flow.enter(FlowState::ReadingSettings);
        let settings = load_settings(self.settings.as_ref()).await?;
        let api_key = settings
            .api_key()
            .ok_or(ProofreadError::MissingCredential)?
            .to_string();
        let request = RewriteRequest::new(selected_text, settings.tone)?;

        flow.enter(FlowState::Requesting);
        debug!(tone = %settings.tone, chars = selected_text.chars().count(), "requesting rewrite");
        let corrected = self.rewriter.rewrite(&request, &api_key).await?;
        if corrected.trim().is_empty() {
            return Err(ProofreadError::MalformedResponse(EMPTY_RESULT_MESSAGE.to_string()));
        }

        flow.enter(FlowState::Replacing);
        let message = PageMessage::proofread_result(corrected.as_str(), selected_text);
        let outcome = self.delivery.deliver(tab, &message).await;
        if !outcome.ok {
            return Err(self.delivery.unreachable(outcome).await);
        }
        if !outcome.acknowledged() {
            return Err(ProofreadError::ReplacementConflict);
        }
        Ok(corrected)
    }

    /// Persist the failure and, unless the initiator opted out, tell the page.
    async fn report_failure(&self, err: &ProofreadError, tab: Option<TabId>, options: RunOptions) {
        let message = err.to_string();
        if let Err(e) = record_last_error(self.settings.as_ref(), &message).await {
            warn!(error = %e, "failed to record last error");
        }

        // The page is unreachable; the fallback badge already carries the message.
        if !options.notify_errors || err.kind() == ErrorKind::DeliveryUnreachable {
            return;
        }
        let outcome = self.delivery.deliver(tab, &PageMessage::notice(message)).await;
        if !outcome.ok {
            debug!(reason = outcome.reason.as_str(), "failure notice not delivered");
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
