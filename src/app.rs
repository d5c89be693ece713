//! Component wiring from configuration.

use std::sync::Arc;
use std::time::Duration;

use proofreader_config::{Config, ConfigLoader, FileSettingsStore, OpenAIConfig};
use proofreader_page_content::TabHost;
use proofreader_provider_openai::{OpenAIRewriter, RetryPolicy, RewriterOptions};
use proofreader_runtime::{ActionBadge, BackgroundRouter, Delivery, DeliveryPolicy, Orchestrator};

/// Everything one CLI invocation needs.
pub(crate) struct App {
    pub settings: Arc<FileSettingsStore>,
    pub host: Arc<TabHost>,
    pub badge: Arc<ActionBadge>,
    pub router: BackgroundRouter,
}

impl App {
    pub fn build(config: &Config) -> Self {
        let settings = Arc::new(settings_store(config));
        let host = Arc::new(TabHost::new(config.page.max_frame_depth));
        let badge = Arc::new(ActionBadge::new());

        let delivery = Arc::new(Delivery::with_policy(
            host.clone(),
            badge.clone(),
            settings.clone(),
            DeliveryPolicy::from(&config.delivery),
        ));
        let rewriter = Arc::new(OpenAIRewriter::with_options(rewriter_options(&config.openai)));
        let orchestrator = Arc::new(Orchestrator::new(settings.clone(), rewriter, delivery));
        let router = BackgroundRouter::new(orchestrator, badge.clone());

        Self {
            settings,
            host,
            badge,
            router,
        }
    }
}

pub(crate) fn settings_store(config: &Config) -> FileSettingsStore {
    FileSettingsStore::new(ConfigLoader::expand_path(&config.storage.settings_path))
}

pub(crate) fn rewriter_options(config: &OpenAIConfig) -> RewriterOptions {
    RewriterOptions {
        api_url: config.api_url.clone(),
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        timeout: Duration::from_millis(config.timeout_ms),
        retry: RetryPolicy {
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.backoff_ms),
        },
    }
}
