//! Toolbar action badge.

use parking_lot::Mutex;
use proofreader_protocols::FallbackIndicator;
use tracing::{debug, warn};

pub const DEFAULT_TITLE: &str = "GPT Proofreader";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct BadgeView {
    text: String,
    title: Option<String>,
}

/// In-memory action badge: text plus hover title.
#[derive(Debug, Default)]
pub struct ActionBadge {
    view: Mutex<BadgeView>,
}

impl ActionBadge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.view.lock().text.clone()
    }

    pub fn title(&self) -> String {
        self.view
            .lock()
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn is_visible(&self) -> bool {
        !self.view.lock().text.is_empty()
    }
}

impl FallbackIndicator for ActionBadge {
    fn show(&self, text: &str, title: &str) {
        warn!(badge = text, title, "showing fallback badge");
        *self.view.lock() = BadgeView {
            text: text.to_string(),
            title: Some(title.to_string()),
        };
    }

    fn clear(&self) {
        let mut view = self.view.lock();
        if !view.text.is_empty() {
            debug!("clearing fallback badge");
        }
        *view = BadgeView::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_clear() {
        let badge = ActionBadge::new();
        assert!(!badge.is_visible());
        assert_eq!(badge.title(), DEFAULT_TITLE);

        badge.show("!", "Proofreader: page unreachable");
        assert!(badge.is_visible());
        assert_eq!(badge.text(), "!");
        assert_eq!(badge.title(), "Proofreader: page unreachable");

        badge.clear();
        assert!(!badge.is_visible());
        assert_eq!(badge.title(), DEFAULT_TITLE);
    }
}
