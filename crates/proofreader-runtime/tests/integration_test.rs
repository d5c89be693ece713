//! End-to-end pipeline tests: tab host page, mocked OpenAI endpoint.

use std::sync::Arc;
use std::time::Duration;

use proofreader_config::MemorySettingsStore;
use proofreader_page_content::{Document, ElementId, TabHost};
use proofreader_protocols::settings::{save_api_key, save_tone};
use proofreader_protocols::{ErrorKind, TabId, Tone};
use proofreader_provider_openai::{OpenAIRewriter, RetryPolicy, RewriterOptions};
use proofreader_runtime::{ActionBadge, Delivery, FlowState, Orchestrator, RunOptions};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

const PATH: &str = "/v1/chat/completions";

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    }))
}

fn rate_limited() -> ResponseTemplate {
    ResponseTemplate::new(429).set_body_json(serde_json::json!({
        "error": {"message": "Rate limit reached for requests"}
    }))
}

struct Pipeline {
    orchestrator: Orchestrator,
    host: Arc<TabHost>,
}

async fn pipeline(server: &MockServer, api_key: Option<&str>) -> Pipeline {
    let host = Arc::new(TabHost::default());
    let settings = Arc::new(MemorySettingsStore::new());
    if let Some(key) = api_key {
        save_api_key(settings.as_ref(), key).await.unwrap();
    }
    save_tone(settings.as_ref(), Tone::Friendly).await.unwrap();

    let rewriter = OpenAIRewriter::with_options(RewriterOptions {
        api_url: format!("{}{}", server.uri(), PATH),
        retry: RetryPolicy {
            max_retries: 2,
            backoff: Duration::from_millis(20),
        },
        ..Default::default()
    });
    let delivery = Arc::new(Delivery::new(
        host.clone(),
        Arc::new(ActionBadge::new()),
        settings.clone(),
    ));
    Pipeline {
        orchestrator: Orchestrator::new(settings, Arc::new(rewriter), delivery),
        host,
    }
}

fn open_selected(host: &TabHost, value: &str, start: usize, end: usize) -> (TabId, ElementId, String) {
    let mut doc = Document::new();
    let field = doc.add_text_field(None, value);
    doc.select_in_field(field, start, end);
    let tab = host.open(doc);
    let selected = host.context_menu(tab).unwrap();
    (tab, field, selected)
}

fn value_of(host: &TabHost, tab: TabId, field: ElementId) -> String {
    host.with_document(tab, |doc| doc.text_of(field).map(str::to_string))
        .flatten()
        .unwrap_or_default()
}

#[tokio::test]
async fn test_end_to_end_replacement() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path(PATH))
        .and(matchers::header("authorization", "Bearer sk-live"))
        .respond_with(completion("The dog ran fast."))
        .expect(1)
        .mount(&server)
        .await;
    let p = pipeline(&server, Some("sk-live")).await;
    let (tab, field, selected) = open_selected(&p.host, "The dog ran fastt", 0, 17);

    let report = p.orchestrator.run(&selected, Some(tab), RunOptions::default()).await;
    assert_eq!(report.final_state(), FlowState::Done);
    assert_eq!(value_of(&p.host, tab, field), "The dog ran fast.");
    let caret = p.host.with_document(tab, |doc| doc.field_caret(field)).flatten();
    assert_eq!(caret, Some((17, 17)));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(body["messages"][1]["content"], "The dog ran fastt");
    assert!(
        body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("friendly tone")
    );
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&server)
        .await;
    let p = pipeline(&server, None).await;
    let (tab, field, selected) = open_selected(&p.host, "teh", 0, 3);

    let err = p
        .orchestrator
        .run_proofread(&selected, Some(tab), RunOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingCredential);
    assert_eq!(value_of(&p.host, tab, field), "teh");
}

#[tokio::test]
async fn test_rate_limit_exhausted_leaves_page_alone() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path(PATH))
        .respond_with(rate_limited())
        .expect(3)
        .mount(&server)
        .await;
    let p = pipeline(&server, Some("sk-live")).await;
    let (tab, field, selected) = open_selected(&p.host, "teh cat", 0, 7);

    let err = p
        .orchestrator
        .run_proofread(&selected, Some(tab), RunOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(err.to_string(), "OpenAI API Error: Rate limit reached for requests");
    assert_eq!(value_of(&p.host, tab, field), "teh cat");
    assert_eq!(p.host.notices(tab)[0].message(), err.to_string());
}

#[tokio::test]
async fn test_single_rate_limit_then_success() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path(PATH))
        .respond_with(rate_limited())
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path(PATH))
        .respond_with(completion("the cat"))
        .expect(1)
        .mount(&server)
        .await;
    let p = pipeline(&server, Some("sk-live")).await;
    let (tab, field, selected) = open_selected(&p.host, "teh cat", 0, 7);

    let corrected = p
        .orchestrator
        .run_proofread(&selected, Some(tab), RunOptions::default())
        .await
        .unwrap();
    assert_eq!(corrected, "the cat");
    assert_eq!(value_of(&p.host, tab, field), "the cat");
}
