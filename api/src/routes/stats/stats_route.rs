//! GET /api/stats — usage dashboard data.

use std::sync::Arc;

use axum::extract::State;
use usage_stats::StatsSnapshot;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

pub async fn stats(State(state): State<Arc<AppState>>) -> ApiResponse<StatsSnapshot> {
    ApiResponse::success(state.stats.snapshot().await)
}
