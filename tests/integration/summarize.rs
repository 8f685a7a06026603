use std::time::Duration;

use axum::http::StatusCode;
use concise_news::config::CredentialPolicy;
use concise_news::summarizer::mock::MOCK_SUFFIX;
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    app, post_summarize, tokenless_config, upstream_config, MODEL_PATH, TOKEN, VALID_TEXT,
};

#[tokio::test]
async fn upstream_summary_is_returned() {
    let server = MockServer::start_async().await;
    let auth = format!("Bearer {TOKEN}");
    let upstream = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(MODEL_PATH)
                .header("authorization", auth.as_str())
                .json_body(json!({ "inputs": VALID_TEXT }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([{ "summary_text": "X" }]));
        })
        .await;

    let (status, body) =
        post_summarize(app(&upstream_config(&server)), json!({ "text": VALID_TEXT })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "summary": "X" }));
    upstream.assert_hits_async(1).await;
}

#[tokio::test]
async fn repeated_requests_return_same_summary() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200)
                .json_body(json!([{ "summary_text": "Council passes budget." }]));
        })
        .await;

    let config = upstream_config(&server);
    let (_, first) = post_summarize(app(&config), json!({ "text": VALID_TEXT })).await;
    let (_, second) = post_summarize(app(&config), json!({ "text": VALID_TEXT })).await;

    assert_eq!(first, second);
    assert_eq!(first["summary"], "Council passes budget.");
    upstream.assert_hits_async(2).await;
}

#[tokio::test]
async fn short_text_is_rejected_without_network() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(json!([{ "summary_text": "X" }]));
        })
        .await;

    let (status, body) = post_summarize(
        app(&upstream_config(&server)),
        json!({ "text": "only nine words in this text which is short" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Text should be at least 10 words long");
    upstream.assert_hits_async(0).await;
}

#[tokio::test]
async fn blank_text_is_rejected() {
    let server = MockServer::start_async().await;

    for text in ["", "    "] {
        let (status, body) =
            post_summarize(app(&upstream_config(&server)), json!({ "text": text })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Text cannot be empty");
    }
}

#[tokio::test]
async fn mock_mode_truncates_without_network() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(json!([{ "summary_text": "X" }]));
        })
        .await;

    let words: Vec<String> = (1..=60).map(|i| format!("word{i}")).collect();
    let text = words.join("  ");

    let (status, body) = post_summarize(
        app(&tokenless_config(&server, CredentialPolicy::Mock)),
        json!({ "text": text }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["summary"],
        format!("{}{}", words[..50].join(" "), MOCK_SUFFIX)
    );
    upstream.assert_hits_async(0).await;
}

#[tokio::test]
async fn strict_mode_without_token_is_server_error() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(json!([{ "summary_text": "X" }]));
        })
        .await;

    let (status, body) = post_summarize(
        app(&tokenless_config(&server, CredentialPolicy::Strict)),
        json!({ "text": VALID_TEXT }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    upstream.assert_hits_async(0).await;
}

#[tokio::test]
async fn model_loading_is_service_unavailable() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(503)
                .json_body(json!({ "error": "Model facebook/bart-large-cnn is currently loading" }));
        })
        .await;

    let (status, body) =
        post_summarize(app(&upstream_config(&server)), json!({ "text": VALID_TEXT })).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());
    assert!(body["details"].is_string());
    // Status responses are not retried.
    upstream.assert_hits_async(1).await;
}

#[tokio::test]
async fn upstream_error_status_is_passed_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(401).body("Invalid credentials in Authorization header");
        })
        .await;

    let (status, body) =
        post_summarize(app(&upstream_config(&server)), json!({ "text": VALID_TEXT })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "error": "Hugging Face API Error: Invalid credentials in Authorization header" })
    );
}

#[tokio::test]
async fn upstream_server_error_is_not_retried() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(500).body("Internal error");
        })
        .await;

    let config = concise_news::Config {
        retry_max_attempts: 3,
        ..upstream_config(&server)
    };

    let (status, body) = post_summarize(app(&config), json!({ "text": VALID_TEXT })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Hugging Face API Error: Internal error" }));
    upstream.assert_hits_async(1).await;
}

#[tokio::test]
async fn empty_upstream_array_is_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(json!([]));
        })
        .await;

    let (status, body) =
        post_summarize(app(&upstream_config(&server)), json!({ "text": VALID_TEXT })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Empty response from Hugging Face API" }));
}

#[tokio::test]
async fn missing_summary_text_is_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(json!([{ "generated_text": "X" }]));
        })
        .await;

    let (status, body) =
        post_summarize(app(&upstream_config(&server)), json!({ "text": VALID_TEXT })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Invalid response format from Hugging Face API" })
    );
}

#[tokio::test]
async fn unparseable_upstream_body_is_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).body("not json");
        })
        .await;

    let (status, body) =
        post_summarize(app(&upstream_config(&server)), json!({ "text": VALID_TEXT })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to parse Hugging Face response:"));
}

#[tokio::test]
async fn timeouts_are_retried_then_reported() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!([{ "summary_text": "too late" }]));
        })
        .await;

    let config = concise_news::Config {
        http_timeout_secs: 1,
        retry_max_attempts: 2,
        ..upstream_config(&server)
    };

    let (status, body) = post_summarize(app(&config), json!({ "text": VALID_TEXT })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to connect to Hugging Face API:"));
    upstream.assert_hits_async(2).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn timeout_then_success_is_recovered() {
    let server = MockServer::start_async().await;
    let mut slow = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!([{ "summary_text": "too late" }]));
        })
        .await;

    let config = concise_news::Config {
        http_timeout_secs: 1,
        retry_max_attempts: 2,
        retry_delay_ms: 500,
        ..upstream_config(&server)
    };

    let request = tokio::spawn(post_summarize(app(&config), json!({ "text": VALID_TEXT })));

    // Swap in a fast upstream once the first attempt is in flight.
    let mut first_hits = 0;
    for _ in 0..100 {
        first_hits = slow.hits_async().await;
        if first_hits > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(first_hits, 1);
    slow.delete_async().await;

    let fast = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200)
                .json_body(json!([{ "summary_text": "recovered" }]));
        })
        .await;

    let (status, body) = request.await.unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "summary": "recovered" }));
    fast.assert_hits_async(1).await;
}

#[tokio::test]
async fn unreachable_upstream_is_server_error() {
    let config = concise_news::Config {
        hf_api_token: Some(TOKEN.to_string()),
        hf_api_url: "http://127.0.0.1:1/models/facebook/bart-large-cnn".to_string(),
        retry_delay_ms: 10,
        metrics_enabled: false,
        ..concise_news::Config::default()
    };

    let (status, body) = post_summarize(app(&config), json!({ "text": VALID_TEXT })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to connect to Hugging Face API:"));
}
