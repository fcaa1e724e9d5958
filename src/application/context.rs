//! Request Context - 请求级上下文
//!
//! 由边界层（HTTP）构造，贯穿一次请求的全部服务调用。
//! 取消令牌在请求超时或客户端断开时被触发，重试循环会观察它。

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// 请求级上下文
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    caller_id: Option<String>,
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            caller_id: None,
            cancel: CancellationToken::new(),
        }
    }

    /// 无外部请求时使用（启动任务、测试）
    pub fn background() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// 边界层认证后提供的调用方身份
    pub fn with_caller(mut self, caller_id: impl Into<String>) -> Self {
        self.caller_id = Some(caller_id.into());
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn caller_id(&self) -> Option<&str> {
        self.caller_id.as_deref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}
