//! HTTP Middleware
//!
//! - error_logging_middleware: 4xx / 5xx 状态码日志
//! - request_context_middleware: 为每个请求构造 RequestContext

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::application::RequestContext;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
/// 注意：业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

/// 请求上下文中间件
///
/// - 复用客户端传入的 `x-request-id`，否则生成新的 UUID
/// - `x-user-id` 作为调用方身份（由上游网关认证）
/// - 客户端断开导致 handler future 被丢弃时，取消令牌被触发，重试循环随之停止
/// - 响应头回写 `x-request-id`
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let cancel = CancellationToken::new();
    let mut ctx = RequestContext::new(request_id.clone()).with_cancellation(cancel.clone());
    if let Some(caller) = request
        .headers()
        .get(&USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        ctx = ctx.with_caller(caller);
    }
    request.extensions_mut().insert(ctx);

    let guard = cancel.drop_guard();
    let mut response = next.run(request).await;
    guard.disarm();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
