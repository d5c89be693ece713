//! In-process tab host: pages addressed by tab id, each optionally running the
//! content script.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use proofreader_protocols::{PageMessage, PageResponse, PageTransport, TabId, TransportError};
use tracing::{debug, trace};

use crate::content_script::{ContentScript, Notice};
use crate::document::Document;
use crate::selection::DEFAULT_MAX_FRAME_DEPTH;

pub const NO_RECEIVER_ERROR: &str = "Could not establish connection. Receiving end does not exist.";
pub const PORT_CLOSED_ERROR: &str = "The message port closed before a response was received.";

pub fn no_tab_error(tab: TabId) -> String {
    format!("No tab with id: {}.", tab)
}

enum Receiver {
    Script(ContentScript),
    /// Restricted or not-yet-injected page.
    Missing,
    /// Script present but never answers.
    Unresponsive,
}

struct Tab {
    document: Document,
    receiver: Receiver,
}

pub struct TabHost {
    tabs: Mutex<HashMap<TabId, Tab>>,
    next_id: AtomicI64,
    max_frame_depth: usize,
}

impl Default for TabHost {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DEPTH)
    }
}

impl TabHost {
    pub fn new(max_frame_depth: usize) -> Self {
        Self {
            tabs: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            max_frame_depth,
        }
    }

    fn insert(&self, document: Document, receiver: Receiver) -> TabId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.tabs.lock().insert(id, Tab { document, receiver });
        id
    }

    /// Open a page with the content script injected.
    pub fn open(&self, document: Document) -> TabId {
        let script = ContentScript::new(self.max_frame_depth);
        self.insert(document, Receiver::Script(script))
    }

    pub fn open_without_script(&self, document: Document) -> TabId {
        self.insert(document, Receiver::Missing)
    }

    pub fn open_unresponsive(&self, document: Document) -> TabId {
        self.insert(document, Receiver::Unresponsive)
    }

    pub fn close(&self, tab: TabId) -> bool {
        self.tabs.lock().remove(&tab).is_some()
    }

    /// Right-click gesture: the script captures the selection, the menu gets its text.
    pub fn context_menu(&self, tab: TabId) -> Option<String> {
        let tabs = self.tabs.lock();
        let tab = tabs.get(&tab)?;
        match &tab.receiver {
            Receiver::Script(script) => Some(script.on_context_menu(&tab.document)),
            _ => {
                let (text, _) = crate::selection::capture(&tab.document, self.max_frame_depth);
                Some(text)
            }
        }
    }

    pub fn with_document<R>(&self, tab: TabId, f: impl FnOnce(&mut Document) -> R) -> Option<R> {
        let mut tabs = self.tabs.lock();
        tabs.get_mut(&tab).map(|t| f(&mut t.document))
    }

    pub fn notices(&self, tab: TabId) -> Vec<Notice> {
        match self.tabs.lock().get(&tab).map(|t| &t.receiver) {
            Some(Receiver::Script(script)) => script.notices(),
            _ => Vec::new(),
        }
    }
}

/// Messages cross the context boundary as JSON, like a structured clone.
fn clone_across(message: &PageMessage) -> Result<PageMessage, TransportError> {
    serde_json::to_value(message)
        .and_then(serde_json::from_value)
        .map_err(|e| TransportError::Exception(e.to_string()))
}

#[async_trait]
impl PageTransport for TabHost {
    async fn send(&self, tab: TabId, message: &PageMessage) -> Result<PageResponse, TransportError> {
        let message = clone_across(message)?;
        let mut tabs = self.tabs.lock();
        let Some(entry) = tabs.get_mut(&tab) else {
            debug!(tab, "send to unknown tab");
            return Err(TransportError::Runtime(no_tab_error(tab)));
        };
        trace!(tab, kind = message.kind(), "delivering to tab");
        match &entry.receiver {
            Receiver::Script(script) => Ok(script.handle(&mut entry.document, &message)),
            Receiver::Missing => Err(TransportError::Runtime(NO_RECEIVER_ERROR.to_string())),
            Receiver::Unresponsive => Err(TransportError::Runtime(PORT_CLOSED_ERROR.to_string())),
        }
    }
}
