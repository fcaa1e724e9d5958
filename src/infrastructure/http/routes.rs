//! HTTP Routes
//!
//! API Endpoints:
//! - /health                      GET   健康检查
//! - /metrics                     GET   遥测计数快照
//! - /v1.2/stories?id=N           GET   故事（固定字段）
//! - /v2.0/stories/:id            GET   故事 + 作者（完整）
//! - /v2.0/stories/:id/view       POST  故事（按字段选择投影）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .nest("/v1.2", v1_2_routes())
        .nest("/v2.0", v2_0_routes())
}

/// v1.2 路由
fn v1_2_routes() -> Router<Arc<AppState>> {
    Router::new().route("/stories", get(handlers::get_story_legacy))
}

/// v2.0 路由
fn v2_0_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stories/:id", get(handlers::get_story))
        .route("/stories/:id/view", post(handlers::view_story))
}
