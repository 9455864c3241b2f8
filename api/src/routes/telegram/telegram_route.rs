//! POST /webhook/telegram — bot updates.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use crate::{
    core::{
        app_state::AppState,
        channels::{extract_telegram, ignored},
    },
    error_handler::AppResult,
    routes::telegram::telegram_request::TelegramUpdate,
};

/// Handler: POST /webhook/telegram
///
/// Replies inline with a `sendMessage` webhook method, so no outbound Bot API
/// call is needed.
pub async fn telegram_update(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TelegramUpdate>, JsonRejection>,
) -> AppResult<Response> {
    let Json(update) = payload?;

    let Some(inbound) = extract_telegram(&update) else {
        debug!(update_id = update.update_id, "telegram update without text ignored");
        return Ok(ignored());
    };

    info!(channel = "telegram", update_id = update.update_id, "message received");
    let reply = state.answer(&inbound).await;
    Ok(inbound.into_reply(reply).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, test_state};
    use serde_json::json;

    #[tokio::test]
    async fn replies_with_send_message_method() {
        let (state, _dir) = test_state().await;
        let update: TelegramUpdate = serde_json::from_value(json!({
            "update_id": 5,
            "message": { "chat": { "id": 77 }, "text": "What is OpsMate?" }
        }))
        .unwrap();

        let resp = telegram_update(State(state.clone()), Ok(Json(update))).await.unwrap();
        assert_eq!(
            body_json(resp).await,
            json!({ "method": "sendMessage", "chat_id": 77, "text": "Zakbot offers..." })
        );
        assert_eq!(state.stats.snapshot().await.by_channel["telegram"], 1);
    }

    #[tokio::test]
    async fn updates_without_text_are_ignored() {
        let (state, _dir) = test_state().await;
        let update: TelegramUpdate =
            serde_json::from_value(json!({ "update_id": 6, "my_chat_member": {} })).unwrap();

        let resp = telegram_update(State(state), Ok(Json(update))).await.unwrap();
        assert_eq!(body_json(resp).await, json!({ "status": "ignored" }));
    }
}
