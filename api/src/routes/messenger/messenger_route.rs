//! GET/POST /webhook/messenger — page webhook.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use crate::{
    core::{
        app_state::AppState,
        channels::{extract_messenger, ignored},
    },
    error_handler::{AppError, AppResult},
    routes::messenger::messenger_request::{MessengerWebhook, VerifyQuery},
};

/// Handler: GET /webhook/messenger
///
/// Subscription handshake: echoes `hub.challenge` when `hub.mode=subscribe`
/// and `hub.verify_token` matches the configured token.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    query: Result<Query<VerifyQuery>, QueryRejection>,
) -> AppResult<String> {
    let Query(q) = query?;

    let expected = state.settings.messenger_verify_token.as_deref();
    let subscribed = q.mode.as_deref() == Some("subscribe");
    let token_ok = expected.is_some() && q.verify_token.as_deref() == expected;

    if subscribed && token_ok {
        info!("messenger webhook verified");
        Ok(q.challenge.unwrap_or_default())
    } else {
        warn!(mode = ?q.mode, configured = expected.is_some(), "messenger verification refused");
        Err(AppError::Forbidden)
    }
}

/// Handler: POST /webhook/messenger
pub async fn receive(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MessengerWebhook>, JsonRejection>,
) -> AppResult<Response> {
    let Json(hook) = payload?;

    let Some(inbound) = extract_messenger(&hook) else {
        debug!(object = %hook.object, "messenger event without text ignored");
        return Ok(ignored());
    };

    info!(channel = "messenger", len = inbound.text().len(), "message received");
    let reply = state.answer(&inbound).await;
    Ok(inbound.into_reply(reply).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, test_state, test_state_with};
    use axum::http::StatusCode;
    use serde_json::json;

    fn query(mode: &str, token: &str, challenge: &str) -> Result<Query<VerifyQuery>, QueryRejection> {
        Ok(Query(VerifyQuery {
            mode: Some(mode.into()),
            verify_token: Some(token.into()),
            challenge: Some(challenge.into()),
        }))
    }

    #[tokio::test]
    async fn handshake_echoes_challenge() {
        let (state, _dir) = test_state_with(|s| s.messenger_verify_token = Some("s3cret".into())).await;
        let out = verify(State(state), query("subscribe", "s3cret", "1158201444")).await.unwrap();
        assert_eq!(out, "1158201444");
    }

    #[tokio::test]
    async fn handshake_rejects_wrong_or_unconfigured_token() {
        let (state, _dir) = test_state_with(|s| s.messenger_verify_token = Some("s3cret".into())).await;
        let err = verify(State(state), query("subscribe", "nope", "1")).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let (state, _dir) = test_state().await;
        let err = verify(State(state), query("subscribe", "", "1")).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn answers_sender_with_send_api_envelope() {
        let (state, _dir) = test_state().await;
        let hook: MessengerWebhook = serde_json::from_value(json!({
            "object": "page",
            "entry": [{ "messaging": [{ "sender": { "id": "9001" }, "message": { "text": "Hello" } }] }]
        }))
        .unwrap();

        let resp = receive(State(state.clone()), Ok(Json(hook))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({ "recipient": { "id": "9001" }, "message": { "text": "Zakbot offers..." } })
        );
        assert_eq!(state.stats.snapshot().await.by_channel["messenger"], 1);
    }

    #[tokio::test]
    async fn delivery_receipts_are_ignored() {
        let (state, _dir) = test_state().await;
        let hook: MessengerWebhook = serde_json::from_value(json!({
            "object": "page",
            "entry": [{ "messaging": [{ "sender": { "id": "9001" }, "read": { "watermark": 1 } }] }]
        }))
        .unwrap();

        let resp = receive(State(state.clone()), Ok(Json(hook))).await.unwrap();
        assert_eq!(body_json(resp).await, json!({ "status": "ignored" }));
        assert_eq!(state.stats.snapshot().await.total_messages, 0);
    }
}
