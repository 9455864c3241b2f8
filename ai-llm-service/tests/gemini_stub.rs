//! Exercises `GeminiService` against an in-process axum stub of the Gemini API.

use std::sync::{Arc, Mutex};

use ai_llm_service::{
    AiLlmError, GeminiService, LlmModelConfig,
    error_handler::{ProviderError, ProviderErrorKind},
};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Recorded {
    calls: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

#[derive(serde::Deserialize)]
struct KeyParam {
    key: Option<String>,
}

async fn spawn_stub(status: StatusCode, body: Value) -> (String, Recorded) {
    let recorded = Recorded::default();

    let app = Router::new()
        .fallback(
            move |State(rec): State<Recorded>,
                  uri: Uri,
                  Query(q): Query<KeyParam>,
                  Json(req): Json<Value>| {
                let body = body.clone();
                async move {
                    rec.calls
                        .lock()
                        .unwrap()
                        .push((uri.path().to_string(), q.key, req));
                    let resp: Response = (status, Json(body)).into_response();
                    resp
                }
            },
        )
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), recorded)
}

fn cfg(endpoint: &str, model: &str) -> LlmModelConfig {
    LlmModelConfig {
        model: model.to_string(),
        endpoint: endpoint.to_string(),
        api_key: "test-key".to_string(),
        timeout_secs: Some(5),
    }
}

#[tokio::test]
async fn embed_posts_content_parts_and_reads_values() {
    let (base, rec) = spawn_stub(StatusCode::OK, json!({ "embedding": { "values": [0.25, -0.5, 1.0] } })).await;
    let svc = GeminiService::new(cfg(&base, "embedding-001")).unwrap();

    let values = svc.embed("What services does Zakbot offer?").await.unwrap();
    assert_eq!(values, vec![0.25, -0.5, 1.0]);

    let calls = rec.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (path, key, body) = &calls[0];
    assert_eq!(path, "/models/embedding-001:embedContent");
    assert_eq!(key.as_deref(), Some("test-key"));
    assert_eq!(
        body,
        &json!({ "content": { "parts": [{ "text": "What services does Zakbot offer?" }] } })
    );
}

#[tokio::test]
async fn embed_maps_http_500_to_provider_error() {
    let (base, _rec) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": { "code": 500, "message": "backend exploded" } }),
    )
    .await;
    let svc = GeminiService::new(cfg(&base, "embedding-001")).unwrap();

    let err = svc.embed("hello").await.unwrap_err();
    match err {
        AiLlmError::Provider(ProviderError {
            kind: ProviderErrorKind::HttpStatus(http),
            ..
        }) => {
            assert_eq!(http.status.as_u16(), 500);
            assert_eq!(http.snippet, "backend exploded");
            assert!(!http.url.contains("test-key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn embed_without_values_is_an_error() {
    let (base, _rec) = spawn_stub(StatusCode::OK, json!({ "embedding": {} })).await;
    let svc = GeminiService::new(cfg(&base, "embedding-001")).unwrap();

    let err = svc.embed("hello").await.unwrap_err();
    assert!(matches!(
        err,
        AiLlmError::Provider(ProviderError {
            kind: ProviderErrorKind::MissingField("embedding.values"),
            ..
        })
    ));
}

#[tokio::test]
async fn generate_sends_single_user_turn_and_returns_first_text() {
    let (base, rec) = spawn_stub(
        StatusCode::OK,
        json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": "Zakbot offers..." }] } }] }),
    )
    .await;
    let svc = GeminiService::new(cfg(&base, "gemini-1.5-flash")).unwrap();

    let text = svc.generate("full prompt").await.unwrap();
    assert_eq!(text.as_deref(), Some("Zakbot offers..."));

    let calls = rec.calls.lock().unwrap();
    let (path, _, body) = &calls[0];
    assert_eq!(path, "/models/gemini-1.5-flash:generateContent");
    assert_eq!(
        body,
        &json!({ "contents": [{ "role": "user", "parts": [{ "text": "full prompt" }] }] })
    );
}

#[tokio::test]
async fn generate_without_candidates_is_none() {
    let (base, _rec) = spawn_stub(StatusCode::OK, json!({ "promptFeedback": { "blockReason": "SAFETY" } })).await;
    let svc = GeminiService::new(cfg(&base, "gemini-1.5-flash")).unwrap();

    assert_eq!(svc.generate("prompt").await.unwrap(), None);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let svc = GeminiService::new(cfg(&format!("http://{addr}"), "gemini-1.5-flash")).unwrap();
    let err = svc.generate("prompt").await.unwrap_err();
    assert!(matches!(err, AiLlmError::HttpTransport(_)));
}
