//! OpenAI chat-completions wire types.

use serde::{Deserialize, Serialize};

/// Chat-completions request body.
#[derive(Debug, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    pub max_tokens: u32,
}

/// Chat message.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub role: &'static str,
    pub content: String,
}

impl ApiMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Success body. Everything is optional so that shape problems surface as
/// a missing completion rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

/// Response choice.
#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// Response message.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ApiResponse {
    /// Content of the first choice that has any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .iter()
            .filter_map(|choice| choice.message.as_ref())
            .find_map(|message| message.content.as_deref())
    }
}

/// Error body: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

/// Error details.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

/// Structured error message from a response body, if there is one.
pub fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
