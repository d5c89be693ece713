//! OpenAI rewrite client for the proofreader.
//!
//! Sends the selected text to a chat-completions endpoint with a tone
//! instruction and returns the corrected text. Retries HTTP 429 with linear
//! backoff and enforces a per-attempt timeout.

mod api;
mod client;
mod prompt;
mod retry;

pub use client::{OpenAIRewriter, RewriterOptions};
pub use prompt::system_prompt;
pub use retry::RetryPolicy;
