//! Chat-completions rewrite client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use proofreader_protocols::error::ProofreadError;
use proofreader_protocols::rewrite::{RewriteRequest, RewriteResult, Rewriter};

use crate::api::{parse_error_message, ApiRequest, ApiResponse};
use crate::prompt::build_messages;
use crate::retry::RetryPolicy;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Client settings.
#[derive(Debug, Clone)]
pub struct RewriterOptions {
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Per-attempt limit covering the request and the response body.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for RewriterOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Raw result of one HTTP attempt.
struct AttemptResponse {
    status: StatusCode,
    body: String,
}

/// OpenAI-backed [`Rewriter`].
pub struct OpenAIRewriter {
    options: RewriterOptions,
    client: reqwest::Client,
}

impl OpenAIRewriter {
    pub fn new() -> Self {
        Self::with_options(RewriterOptions::default())
    }

    /// Create a rewriter against a custom endpoint (for OpenAI-compatible APIs).
    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self::with_options(RewriterOptions {
            api_url: api_url.into(),
            ..Default::default()
        })
    }

    pub fn with_options(options: RewriterOptions) -> Self {
        Self {
            options,
            client: reqwest::Client::new(),
        }
    }

    pub fn options(&self) -> &RewriterOptions {
        &self.options
    }

    fn build_request(&self, request: &RewriteRequest) -> ApiRequest {
        ApiRequest {
            model: self.options.model.clone(),
            messages: build_messages(request),
            max_tokens: self.options.max_tokens,
        }
    }

    /// One POST, bounded by the timeout. Dropping the future on expiry aborts the call.
    async fn send_once(
        &self,
        api_request: &ApiRequest,
        api_key: &str,
    ) -> Result<AttemptResponse, ProofreadError> {
        let attempt = async {
            let response = self
                .client
                .post(&self.options.api_url)
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .json(api_request)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(AttemptResponse { status, body })
        };

        match timeout(self.options.timeout, attempt).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(ProofreadError::Network(e.to_string())),
            Err(_) => {
                warn!("OpenAI request timed out after {:?}", self.options.timeout);
                Err(ProofreadError::Timeout(self.options.timeout.as_millis() as u64))
            }
        }
    }
}

impl Default for OpenAIRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Message for a failed status: the structured error text, or a generic line.
fn failure_message(status: StatusCode, body: &str) -> String {
    parse_error_message(body)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

/// Corrected text from a 2xx body.
fn parse_success(body: &str) -> RewriteResult {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| ProofreadError::MalformedResponse(format!("Unexpected response format: {}", e)))?;

    if let Some(message) = response.error.as_ref().and_then(|e| e.message.clone()) {
        return Err(ProofreadError::RemoteRejected(message));
    }

    response
        .first_content()
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            ProofreadError::MalformedResponse("Response did not contain any completion text".to_string())
        })
}

#[async_trait]
impl Rewriter for OpenAIRewriter {
    async fn rewrite(&self, request: &RewriteRequest, api_key: &str) -> RewriteResult {
        let api_request = self.build_request(request);
        let retry = &self.options.retry;
        let mut retries = 0;

        debug!(
            "Sending {} chars to {} for proofreading (tone: {})",
            request.original_text.chars().count(),
            self.options.model,
            request.tone
        );

        loop {
            let response = self.send_once(&api_request, api_key).await?;

            if response.status == StatusCode::TOO_MANY_REQUESTS {
                if retries < retry.max_retries {
                    retries += 1;
                    let delay = retry.delay_for_attempt(retries);
                    warn!(
                        "Rate limited (retry {}/{}), retrying in {:?}",
                        retries, retry.max_retries, delay
                    );
                    sleep(delay).await;
                    continue;
                }
                return Err(ProofreadError::RateLimited(failure_message(
                    response.status,
                    &response.body,
                )));
            }

            if !response.status.is_success() {
                let message = failure_message(response.status, &response.body);
                warn!("OpenAI rejected request ({}): {}", response.status, message);
                return Err(ProofreadError::RemoteRejected(message));
            }

            return parse_success(&response.body);
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
