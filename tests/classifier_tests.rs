// tests for live provider calls against a mock server

use pageintent::{
    ClassificationResult, Classifier, Endpoints, PageRequest, PrivacyConfig, ProviderConfig,
    SUMMARY_LIMIT, Service, Settings, intent,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TITLE: &str = "Understanding Ownership in Rust - The Book";

fn settings(service: Service, model: &str) -> Settings {
    Settings {
        ai_settings: ProviderConfig::new(service, "test-key", model),
        privacy_settings: PrivacyConfig::default(),
    }
}

fn page() -> PageRequest {
    PageRequest::new(
        "Ownership is a set of rules that govern how a Rust program manages memory.",
        "https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html",
        TITLE,
    )
}

fn classifier(server: &MockServer) -> Classifier {
    Classifier::with_endpoints(Endpoints::all(server.uri()))
}

fn openai_reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

async fn mount_openai(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn generic_fallback() -> ClassificationResult {
    ClassificationResult::new("Page about Understanding Ownership in Rus...", intent::RESEARCH)
}

#[tokio::test]
async fn test_openai_json_content() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        ResponseTemplate::new(200).set_body_json(openai_reply(r#"{"summary":"S","intent":"I"}"#)),
    )
    .await;

    let result = classifier(&server)
        .classify(&page(), &settings(Service::OpenAI, "gpt-3.5-turbo"))
        .await;

    assert_eq!(result, ClassificationResult::new("S", "I"));
}

#[tokio::test]
async fn test_openai_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "gpt-4", "max_tokens": 150 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply("A short answer")))
        .expect(1)
        .mount(&server)
        .await;

    classifier(&server)
        .classify(&page(), &settings(Service::OpenAI, "gpt-4"))
        .await;

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");

    let prompt = messages[1]["content"].as_str().unwrap();
    assert!(prompt.starts_with(
        "URL: https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html\nTitle: Understanding Ownership in Rust - The Book\nContent: Ownership"
    ));
}

#[tokio::test]
async fn test_plain_text_is_truncated() {
    let server = MockServer::start().await;
    let long: String = "Rust ownership, moves and borrowing explained. "
        .repeat(4)
        .chars()
        .take(150)
        .collect();
    assert_eq!(long.chars().count(), 150);

    mount_openai(&server, ResponseTemplate::new(200).set_body_json(openai_reply(&long))).await;

    let result = classifier(&server)
        .classify(&page(), &settings(Service::OpenAI, "gpt-4"))
        .await;

    assert_eq!(result.summary, long.chars().take(100).collect::<String>());
    assert_eq!(result.intent, intent::RESEARCH);
}

#[tokio::test]
async fn test_error_status_falls_back() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        ResponseTemplate::new(401)
            .set_body_json(json!({ "error": { "message": "Incorrect API key provided" } })),
    )
    .await;

    let result = classifier(&server)
        .classify(&page(), &settings(Service::OpenAI, "gpt-4"))
        .await;

    assert_eq!(result, generic_fallback());
}

#[tokio::test]
async fn test_unexpected_envelope_falls_back() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
    )
    .await;

    let result = classifier(&server)
        .classify(&page(), &settings(Service::OpenAI, "gpt-4"))
        .await;

    assert_eq!(result, generic_fallback());
}

#[tokio::test]
async fn test_non_json_body_falls_back() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;

    let result = classifier(&server)
        .classify(&page(), &settings(Service::OpenAI, "gpt-4"))
        .await;

    assert_eq!(result, generic_fallback());
}

#[tokio::test]
async fn test_malformed_model_json_uses_title() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        ResponseTemplate::new(200).set_body_json(openai_reply(r#"{"summary": "cut off"#)),
    )
    .await;

    let result = classifier(&server)
        .classify(&page(), &settings(Service::OpenAI, "gpt-4"))
        .await;

    assert_eq!(result, ClassificationResult::new(TITLE, intent::RESEARCH));
}

#[tokio::test]
async fn test_network_error_falls_back() {
    // nothing listens on port 1
    let classifier = Classifier::with_endpoints(Endpoints::all("http://127.0.0.1:1"));

    let result = classifier
        .classify(&page(), &settings(Service::Anthropic, "claude-3-haiku"))
        .await;

    assert_eq!(result, generic_fallback());
}

#[tokio::test]
async fn test_anthropic_wire_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-haiku",
            "max_tokens": 150,
            "system": "You are an AI that summarizes web pages and determines user intent. Respond in JSON format only."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{
                "type": "text",
                "text": "{\"summary\": \"Rust ownership chapter\", \"intent\": \"Programming\"}"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = classifier(&server)
        .classify(&page(), &settings(Service::Anthropic, "claude-3-haiku"))
        .await;

    assert_eq!(
        result,
        ClassificationResult::new("Rust ownership chapter", "Programming")
    );

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
}

#[tokio::test]
async fn test_gemini_wire_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({ "generationConfig": { "maxOutputTokens": 150 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "{\"summary\":\"Docs\",\"intent\":\"Programming\"}" }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = classifier(&server)
        .classify(&page(), &settings(Service::Gemini, "gemini-pro"))
        .await;

    assert_eq!(result, ClassificationResult::new("Docs", "Programming"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 1);
    assert!(parts[0]["text"].as_str().unwrap().starts_with("URL: "));
    assert!(body["contents"][0].get("role").is_none());
}

#[tokio::test]
async fn test_offline_mode_never_calls_provider() {
    let server = MockServer::start().await;
    mount_openai(&server, ResponseTemplate::new(200).set_body_json(openai_reply("x"))).await;

    let mut offline = settings(Service::OpenAI, "gpt-4");
    offline.privacy_settings.offline_mode = true;

    let result = classifier(&server).classify(&page(), &offline).await;

    assert_eq!(result.intent, intent::RESEARCH);
    assert!(result.summary.starts_with("Page about "));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_settings_are_read_per_call() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        ResponseTemplate::new(200).set_body_json(openai_reply(r#"{"summary":"Live","intent":"Research"}"#)),
    )
    .await;

    let classifier = classifier(&server);
    let mut settings = Settings::default();
    let page = PageRequest::new("", "https://youtube.com/watch?v=1", "clip");

    let before = classifier.classify(&page, &settings).await;
    assert_eq!(before.summary, "Video content");

    settings.ai_settings.api_key = "now-set".to_string();
    let after = classifier.classify(&page, &settings).await;
    assert_eq!(after.summary, "Live");
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        ResponseTemplate::new(200).set_body_json(openai_reply("Same answer every time")),
    )
    .await;

    let classifier = classifier(&server);
    let settings = settings(Service::OpenAI, "gpt-4");

    let first = classifier.classify(&page(), &settings).await;
    let second = classifier.classify(&page(), &settings).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_results_always_usable() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        ResponseTemplate::new(200).set_body_json(openai_reply("   ")),
    )
    .await;

    let classifier = classifier(&server);
    let long_title = "t".repeat(300);
    let titles = ["", "x", TITLE, long_title.as_str()];
    let urls = ["", "https://github.com", "https://python.org", "https://hotel.example"];

    for offline_mode in [true, false] {
        for key in ["", "key"] {
            for title in titles {
                for url in urls {
                    let settings = Settings {
                        ai_settings: ProviderConfig::new(Service::OpenAI, key, "gpt-4"),
                        privacy_settings: PrivacyConfig {
                            offline_mode,
                            collect_stats: false,
                        },
                    };
                    let page = PageRequest::new("", url, title);
                    let result = classifier.classify(&page, &settings).await;

                    assert!(!result.summary.is_empty(), "empty summary for {url} / {title}");
                    assert!(result.summary.chars().count() <= SUMMARY_LIMIT);
                    assert!(!result.intent.is_empty());
                }
            }
        }
    }
}
