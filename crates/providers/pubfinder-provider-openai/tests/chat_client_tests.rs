//! HTTP-level tests against a local mock of the chat completions API

use pubfinder_core::{CompletionRequest, PubfinderError, SummarizerConfig, TextGenerator};
use pubfinder_provider_openai::OpenAIChatClient;
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> OpenAIChatClient {
    let mut config = SummarizerConfig::new("sk-test");
    config.base_url = format!("{}/v1", server.uri());
    OpenAIChatClient::new(&config).unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest {
        system: "Summarize pub reviews.".to_string(),
        user: "Reviews: great stout, friendly staff".to_string(),
        temperature: 0.3,
        max_tokens: 150,
    }
}

#[tokio::test]
async fn test_complete_returns_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 150,
            "messages": [
                {"role": "system", "content": "Summarize pub reviews."},
                {"role": "user", "content": "Reviews: great stout, friendly staff"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Known for its stout."},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server).complete(request()).await.unwrap();
    assert_eq!(text, "Known for its stout.");
}

#[tokio::test]
async fn test_error_status_is_model_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).complete(request()).await.unwrap_err();
    assert!(matches!(err, PubfinderError::Model(_)));
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn test_missing_content_is_model_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(request()).await.unwrap_err();
    assert!(matches!(err, PubfinderError::Model(_)));
}
