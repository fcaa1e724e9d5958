//! Metrics Handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::telemetry::TelemetrySnapshot;

/// 遥测计数快照
pub async fn metrics(State(state): State<Arc<AppState>>) -> Json<ApiResponse<TelemetrySnapshot>> {
    Json(ApiResponse::success(state.telemetry.snapshot()))
}
