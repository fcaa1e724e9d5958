//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::{
    error_logging_middleware, request_context_middleware, REQUEST_ID_HEADER, USER_ID_HEADER,
};
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 构建带全部中间件的 Router
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, REQUEST_ID_HEADER, USER_ID_HEADER])
        .expose_headers([REQUEST_ID_HEADER])
        .max_age(std::time::Duration::from_secs(3600));

    create_routes()
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(middleware::from_fn(request_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state.clone());
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{CreateAuthor, CreateStory, RequestContext, RetryPolicy};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteAuthorRepository,
        SqliteStoryRepository,
    };
    use crate::infrastructure::telemetry::TracingTelemetry;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    const CONTENT: &str = "Once upon a time, far away.";

    async fn state() -> Arc<AppState> {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        Arc::new(AppState::new(
            Arc::new(SqliteStoryRepository::new(pool.clone())),
            Arc::new(SqliteAuthorRepository::new(pool)),
            RetryPolicy::default(),
            TracingTelemetry::new().arc(),
        ))
    }

    /// 写入作者和故事，返回故事 ID
    async fn seed(state: &AppState, with_author: bool) -> u64 {
        let ctx = RequestContext::background();
        let author_id = if with_author {
            state
                .author_service
                .create(
                    &ctx,
                    CreateAuthor {
                        first_name: "Ann".to_string(),
                        last_name: "Lee".to_string(),
                        profile_image_url: "https://cdn.example.com/ann.png".to_string(),
                        slug: "ann-lee-01".to_string(),
                    },
                )
                .await
                .unwrap()
                .id()
                .to_string()
        } else {
            "999".to_string()
        };

        state
            .story_service
            .create(
                &ctx,
                CreateStory {
                    title: "A Tale".to_string(),
                    content: CONTENT.to_string(),
                    author_id,
                },
            )
            .await
            .unwrap()
            .id()
            .value()
    }

    async fn send(state: Arc<AppState>, request: Request<Body>) -> Value {
        let response = build_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let body = send(state().await, get("/health")).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_legacy_story_projection() {
        let state = state().await;
        let id = seed(&state, true).await;

        let body = send(state, get(&format!("/v1.2/stories?id={}", id))).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(
            body["data"],
            json!({
                "id": id,
                "title": "A Tale",
                "author": {"name": "Ann Lee", "profileImageUrl": "https://cdn.example.com/ann.png"}
            })
        );
    }

    #[tokio::test]
    async fn test_legacy_requires_id() {
        let body = send(state().await, get("/v1.2/stories")).await;
        assert_eq!(body["errno"], 400);
        assert_eq!(body["error"], "story ID is required");
    }

    #[tokio::test]
    async fn test_invalid_id_is_bad_request() {
        let body = send(state().await, get("/v2.0/stories/abc")).await;
        assert_eq!(body["errno"], 400);
        assert_eq!(body["error"], "invalid story ID format");
    }

    #[tokio::test]
    async fn test_missing_story_is_not_found() {
        let body = send(state().await, get("/v2.0/stories/41")).await;
        assert_eq!(body["errno"], 404);
        assert_eq!(body["error"], "story not found: 41");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_full_details() {
        let state = state().await;
        let id = seed(&state, true).await;

        let body = send(state, get(&format!("/v2.0/stories/{}", id))).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["story"]["title"], "A Tale");
        assert_eq!(body["data"]["author"]["slug"], "ann-lee-01");
    }

    #[tokio::test]
    async fn test_missing_author_is_partial() {
        let state = state().await;
        let id = seed(&state, false).await;

        let body = send(state, get(&format!("/v2.0/stories/{}", id))).await;
        assert_eq!(body["errno"], 206);
        assert_eq!(body["error"], "author not found: 999");
        assert_eq!(body["data"]["story"]["id"], id);
        assert!(body["data"]["author"].is_null());
    }

    #[tokio::test]
    async fn test_view_with_field_selection() {
        let state = state().await;
        let id = seed(&state, true).await;

        let body = send(
            state.clone(),
            post_json(
                &format!("/v2.0/stories/{}/view", id),
                json!({"fields": {"id": true, "author": {"name": true}}}),
            ),
        )
        .await;
        assert_eq!(body["data"], json!({"id": id, "author": {"name": "Ann Lee"}}));

        let metrics = send(state, get("/metrics")).await;
        assert_eq!(metrics["data"]["counters"]["story.fetch.success"]["count"], 1);
    }

    #[tokio::test]
    async fn test_view_with_malformed_body_uses_envelope() {
        let state = state().await;
        let id = seed(&state, true).await;

        let request = Request::builder()
            .method("POST")
            .uri(format!("/v2.0/stories/{}/view", id))
            .header("content-type", "application/json")
            .body(Body::from("{\"fields\": "))
            .unwrap();

        let body = send(state, request).await;
        assert_eq!(body["errno"], 400);
        assert_eq!(body["error"], "invalid request body");
        assert!(body["data"].is_null());
    }
}
