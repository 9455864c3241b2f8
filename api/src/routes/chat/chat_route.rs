//! POST /api/chat — website widget.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;
use tracing::info;

use crate::{
    core::{
        app_state::AppState,
        channels::{INVALID_MESSAGE, ReplyEnvelope, extract_website},
    },
    error_handler::{AppError, AppResult},
};

/// Handler: POST /api/chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"What services does Zakbot offer?"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<ReplyEnvelope> {
    let Json(body) = payload.map_err(|_| AppError::BadRequest(INVALID_MESSAGE.into()))?;
    let inbound =
        extract_website(&body).ok_or_else(|| AppError::BadRequest(INVALID_MESSAGE.into()))?;

    info!(channel = "website", len = inbound.text().len(), "message received");
    let reply = state.answer(&inbound).await;
    Ok(inbound.into_reply(reply))
}
