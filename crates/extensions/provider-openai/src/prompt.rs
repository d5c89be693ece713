//! Prompt composition.

use proofreader_protocols::rewrite::RewriteRequest;
use proofreader_protocols::types::Tone;

use crate::api::ApiMessage;

/// System instruction for the given tone.
pub fn system_prompt(tone: Tone) -> String {
    format!(
        "You are a helpful assistant. Please proofread the following text and respond in a {} tone.",
        tone.as_str()
    )
}

/// System instruction plus the selected text, verbatim.
pub(crate) fn build_messages(request: &RewriteRequest) -> Vec<ApiMessage> {
    vec![
        ApiMessage::system(system_prompt(request.tone)),
        ApiMessage::user(request.original_text.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_uses_lower_case_tone() {
        let prompt = system_prompt(Tone::Friendly);
        assert!(prompt.contains("friendly tone"));
        assert!(!prompt.contains("Friendly"));
    }

    #[test]
    fn test_user_message_is_verbatim() {
        let request = RewriteRequest::new("  \"quoted\" <b>text</b>\n", Tone::Formal).unwrap();
        let messages = build_messages(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("formal"));
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "  \"quoted\" <b>text</b>\n");
    }
}
