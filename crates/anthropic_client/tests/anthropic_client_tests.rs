use std::time::Duration;

use anthropic_client::{
    build_completion_client, AnthropicClient, ClientConfig, ClientError, ClientState,
    CompletionClient,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const TEST_KEY: &str = "sk-ant-test-key";

fn client_for(server: &MockServer) -> AnthropicClient {
    AnthropicClient::new(ClientConfig::new(Some(TEST_KEY)).with_base_url(server.uri()))
        .expect("client should build with an API key")
}

fn text_reply(text: &str) -> Value {
    json!({
        "id": "msg_013Zva2CMHLNnXjNJJKqJ2EF",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-7-sonnet-20250219",
        "content": [{ "type": "text", "text": text }],
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 2095, "output_tokens": 503 }
    })
}

#[tokio::test]
async fn sends_headers_and_messages_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", TEST_KEY))
        .and(header("anthropic-version", "2023-06-01"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "claude-3-7-sonnet-20250219",
            "max_tokens": 8192,
            "temperature": 1.0,
            "system": "You are a putter expert.",
            "messages": [{ "role": "user", "content": "Newport 2" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("REPORT...")))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .complete("You are a putter expert.", "Newport 2")
        .await
        .expect("call should succeed");

    assert_eq!(text, "REPORT...");
}

#[tokio::test]
async fn request_has_exactly_one_user_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("ok")))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .complete("SYS", "  Del Mar 3\n")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "  Del Mar 3\n");
    assert_eq!(body["system"], "SYS");
}

#[tokio::test]
async fn first_text_part_wins_over_other_parts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                { "type": "tool_use", "id": "toolu_1", "name": "search", "input": {} },
                { "type": "text", "text": "first" },
                { "type": "text", "text": "second" }
            ]
        })))
        .mount(&server)
        .await;

    let text = client_for(&server).complete("SYS", "Phantom X 5").await.unwrap();
    assert_eq!(text, "first");
}

#[tokio::test]
async fn unexpected_reply_shape_is_stringified_not_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "completion": "legacy body", "stop_reason": null })),
        )
        .mount(&server)
        .await;

    let text = client_for(&server).complete("SYS", "Futura X").await.unwrap();
    assert!(text.contains("legacy body"));
}

#[tokio::test]
async fn non_json_success_body_is_returned_raw() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain report"))
        .mount(&server)
        .await;

    let text = client_for(&server).complete("SYS", "TeI3").await.unwrap();
    assert_eq!(text, "plain report");
}

#[tokio::test]
async fn error_status_is_surfaced_once_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "type": "error",
            "error": { "type": "overloaded_error", "message": "Overloaded" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("SYS", "Newport 2")
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "overloaded_error: Overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn authentication_failure_does_not_echo_the_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": { "type": "authentication_error", "message": "invalid x-api-key" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("SYS", "Newport 2")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    let rendered = format!("{err} {err:?}");
    assert!(rendered.contains("invalid x-api-key"));
    assert!(!rendered.contains(TEST_KEY));
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    let client = AnthropicClient::new(
        ClientConfig::new(Some(TEST_KEY)).with_base_url("http://127.0.0.1:1"),
    )
    .unwrap();

    let err = client.complete("SYS", "Newport 2").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn configured_timeout_bounds_the_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_reply("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = AnthropicClient::new(
        ClientConfig::new(Some(TEST_KEY))
            .with_base_url(server.uri())
            .with_timeout(Duration::from_millis(200)),
    )
    .unwrap();

    match client.complete("SYS", "Newport 2").await.unwrap_err() {
        ClientError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn identical_inputs_issue_independent_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("again")))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.complete("SYS", "Newport 2").await.unwrap();
    client.complete("SYS", "Newport 2").await.unwrap();
}

#[tokio::test]
async fn factory_without_key_never_reaches_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_completion_client(ClientConfig::new(None::<String>).with_base_url(server.uri()));
    assert_eq!(client.state(), ClientState::Unusable);

    let err = client.complete("SYS", "Newport 2").await.unwrap_err();
    assert!(matches!(err, ClientError::NotInitialized(_)));
}
