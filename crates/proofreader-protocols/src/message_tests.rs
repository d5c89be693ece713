use super::*;
use serde_json::json;

#[test]
fn test_proofread_result_wire_shape() {
    let msg = PageMessage::proofread_result("The dog ran fast.", "The dog ran fastt");
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "gptProofreadResult",
            "proofreadText": "The dog ran fast.",
            "originalText": "The dog ran fastt"
        })
    );
}

#[test]
fn test_selection_request_notify_defaults_false() {
    let msg: PageMessage =
        serde_json::from_value(json!({"type": "gptProofreadSelectionRequest"})).unwrap();
    assert_eq!(msg, PageMessage::selection_request(false));

    let msg: PageMessage = serde_json::from_value(
        json!({"type": "gptProofreadSelectionRequest", "notifyOnEmpty": true}),
    )
    .unwrap();
    assert_eq!(msg, PageMessage::selection_request(true));
}

#[test]
fn test_ping_wire_shape() {
    let value = serde_json::to_value(PageMessage::ping()).unwrap();
    assert_eq!(value, json!({"type": "gptProofreaderPing"}));
}

#[test]
fn test_plain_notice_has_no_type() {
    let value = serde_json::to_value(PageMessage::notice("hello")).unwrap();
    assert_eq!(value, json!({"message": "hello"}));

    let parsed: PageMessage = serde_json::from_value(json!({"message": "hi"})).unwrap();
    assert_eq!(parsed, PageMessage::notice("hi"));
}

#[test]
fn test_message_kind_names() {
    assert_eq!(PageMessage::ping().kind(), "gptProofreaderPing");
    assert_eq!(PageMessage::notice("x").kind(), "notice");
    assert_eq!(PageMessage::proofread_result("a", "b").kind(), "gptProofreadResult");
}

#[test]
fn test_page_response_shapes() {
    assert_eq!(serde_json::to_value(PageResponse::ok(true)).unwrap(), json!({"ok": true}));
    assert_eq!(
        serde_json::to_value(PageResponse::text("abc")).unwrap(),
        json!({"text": "abc"})
    );
    assert_eq!(serde_json::to_value(PageResponse::empty()).unwrap(), json!({}));
    assert!(PageResponse::ok(true).is_ok());
    assert!(!PageResponse::ok(false).is_ok());
    assert!(!PageResponse::text("abc").is_ok());
}

#[test]
fn test_storage_badge_message() {
    let msg: BackgroundMessage =
        serde_json::from_value(json!({"type": "storageBadge", "state": "error"})).unwrap();
    assert_eq!(msg, BackgroundMessage::StorageBadge { state: BadgeState::Error });
}

#[test]
fn test_proofread_selection_message() {
    let msg: BackgroundMessage =
        serde_json::from_value(json!({"type": "proofreadSelection", "tabId": 12})).unwrap();
    assert_eq!(msg, BackgroundMessage::ProofreadSelection { tab_id: Some(12) });
}

#[test]
fn test_background_response_error() {
    let resp = BackgroundResponse::error("boom");
    assert!(!resp.ok);
    assert_eq!(
        serde_json::to_value(&resp).unwrap(),
        json!({"ok": false, "error": "boom"})
    );
}
