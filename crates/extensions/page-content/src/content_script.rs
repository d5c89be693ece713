//! In-page message handler.

use std::time::Duration;

use parking_lot::Mutex;
use proofreader_protocols::{PageCommand, PageMessage, PageResponse};
use tracing::{debug, info};

use crate::context::SelectionContext;
use crate::document::Document;
use crate::selection::{self, DEFAULT_MAX_FRAME_DEPTH};

/// How long a toast stays on the page.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(4000);

/// Shown when the popup asks for a selection and nothing is selected.
pub const EMPTY_SELECTION_HINT: &str = "Select some text on the page first, then try again.";

/// User-visible notice rendered by the content script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Toast { message: String, lifetime: Duration },
    /// Platform alert, used when the page has no body to attach a toast to.
    Alert { message: String },
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Toast { message, .. } | Notice::Alert { message } => message,
        }
    }
}

/// Per-page script state: the latest capture and the notices shown so far.
pub struct ContentScript {
    max_frame_depth: usize,
    last_capture: Mutex<Option<SelectionContext>>,
    notices: Mutex<Vec<Notice>>,
}

impl Default for ContentScript {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DEPTH)
    }
}

impl ContentScript {
    pub fn new(max_frame_depth: usize) -> Self {
        Self {
            max_frame_depth,
            last_capture: Mutex::new(None),
            notices: Mutex::new(Vec::new()),
        }
    }

    /// Capture on the context-menu gesture, superseding any earlier capture.
    pub fn on_context_menu(&self, doc: &Document) -> String {
        self.capture(doc)
    }

    pub fn last_capture(&self) -> Option<SelectionContext> {
        self.last_capture.lock().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn handle(&self, doc: &mut Document, message: &PageMessage) -> PageResponse {
        debug!(kind = message.kind(), "content script received message");
        match message {
            PageMessage::Command(PageCommand::ProofreadResult {
                proofread_text,
                original_text,
            }) => {
                let context = self.last_capture.lock().take();
                let ok = selection::replace(
                    doc,
                    context.as_ref(),
                    original_text,
                    proofread_text,
                    self.max_frame_depth,
                );
                if !ok {
                    info!("original selection not found, leaving page unchanged");
                }
                PageResponse::ok(ok)
            }
            PageMessage::Command(PageCommand::SelectionRequest { notify_on_empty }) => {
                let text = self.capture(doc);
                if text.is_empty() && *notify_on_empty {
                    self.show_notice(doc, EMPTY_SELECTION_HINT);
                }
                PageResponse::text(text)
            }
            PageMessage::Command(PageCommand::Ping) => PageResponse::ok(true),
            PageMessage::Notice { message } => {
                self.show_notice(doc, message);
                PageResponse::empty()
            }
        }
    }

    fn capture(&self, doc: &Document) -> String {
        let (text, context) = selection::capture(doc, self.max_frame_depth);
        *self.last_capture.lock() = context;
        text
    }

    fn show_notice(&self, doc: &Document, message: &str) {
        let notice = if doc.has_body() {
            Notice::Toast {
                message: message.to_string(),
                lifetime: TOAST_LIFETIME,
            }
        } else {
            Notice::Alert {
                message: message.to_string(),
            }
        };
        self.notices.lock().push(notice);
    }
}
