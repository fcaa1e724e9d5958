//! 统一错误分类
//!
//! 所有跨越仓储边界的错误都是 `DomainError`，服务层只根据 `kind` 分支，
//! 不解析消息文本，也不接触驱动层错误码。

use std::fmt;

use thiserror::Error;

/// 错误种类（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 资源不存在
    NotFound,
    /// 调用方可修正的校验错误
    Validation,
    /// 重试同一操作即可能恢复的瞬时故障
    Transient,
    /// 其他未预期错误
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation",
            ErrorKind::Transient => "transient",
            ErrorKind::Unexpected => "unexpected",
        }
    }

    /// 是否允许本地重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Transient)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 被包装的底层原因
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

const TRANSIENT_MESSAGE: &str = "temporary error occurred";
const UNEXPECTED_MESSAGE: &str = "unexpected error occurred";
const RETRIES_EXHAUSTED_MESSAGE: &str = "operation failed after retries";
const CANCELLED_MESSAGE: &str = "operation cancelled";

/// 领域错误
///
/// `Display` 只输出 `message`，原因仅通过 `source()` 暴露，用于日志诊断。
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DomainError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: Option<Cause>,
}

impl DomainError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// 附加底层原因
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// 创建 NotFound 错误
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NotFound, format!("{} not found: {}", resource, id))
    }

    /// 创建校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// 创建瞬时错误
    pub fn transient(cause: impl Into<Cause>) -> Self {
        Self::new(ErrorKind::Transient, TRANSIENT_MESSAGE).with_cause(cause)
    }

    /// 创建未预期错误
    pub fn unexpected(cause: impl Into<Cause>) -> Self {
        Self::new(ErrorKind::Unexpected, UNEXPECTED_MESSAGE).with_cause(cause)
    }

    /// 重试耗尽
    ///
    /// 最后一次瞬时错误不会被带出，调用方只能看到重试耗尽本身。
    pub fn retries_exhausted() -> Self {
        Self::new(ErrorKind::Unexpected, RETRIES_EXHAUSTED_MESSAGE)
            .with_cause("max retries exceeded")
    }

    /// 调用方已取消（请求超时或断开）
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Unexpected, CANCELLED_MESSAGE)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn is_transient(&self) -> bool {
        self.kind.is_retryable()
    }

    /// 可以返回给外部调用方的消息
    ///
    /// NotFound / Validation 描述具体约束；Transient / Unexpected 只有通用消息，
    /// 原因不会出现在这里。
    pub fn public_message(&self) -> &str {
        match self.kind {
            ErrorKind::Transient => TRANSIENT_MESSAGE,
            _ => &self.message,
        }
    }

    /// 用于日志的完整描述（含原因链）
    pub fn diagnostic(&self) -> String {
        match &self.cause {
            Some(cause) => format!("{}: {}", self.message, cause),
            None => self.message.clone(),
        }
    }
}
