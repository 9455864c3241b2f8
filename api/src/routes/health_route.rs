//! GET /health — liveness.

use serde_json::{Value, json};

use crate::core::http::response_envelope::ApiResponse;

pub async fn health() -> ApiResponse<Value> {
    ApiResponse::success(json!({ "status": "ok" }))
}
