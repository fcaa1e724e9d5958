//! Telemetry Port - 可观测性出站端口
//!
//! 只写的旁路通道：服务按操作名记录 attempt / success / error 事件，
//! 返回值不参与控制流。

use std::time::Duration;

use crate::domain::ErrorKind;

/// 操作结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Attempt,
    Success,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Attempt => "attempt",
            Outcome::Success => "success",
            Outcome::Error => "error",
        }
    }
}

/// 一次可观测事件
#[derive(Debug, Clone)]
pub struct TelemetryEvent {
    /// 操作名，如 `story.create`
    pub operation: &'static str,
    pub outcome: Outcome,
    /// 实体标识等附加字段
    pub fields: Vec<(&'static str, String)>,
    pub error_kind: Option<ErrorKind>,
    pub duration: Option<Duration>,
}

impl TelemetryEvent {
    pub fn new(operation: &'static str, outcome: Outcome) -> Self {
        Self {
            operation,
            outcome,
            fields: Vec::new(),
            error_kind: None,
            duration: None,
        }
    }

    pub fn with_fields(mut self, fields: &[(&'static str, String)]) -> Self {
        self.fields.extend_from_slice(fields);
        self
    }

    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        self.error_kind = Some(kind);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// 计数键，如 `story.create.error`
    pub fn metric_key(&self) -> String {
        format!("{}.{}", self.operation, self.outcome.as_str())
    }
}

/// Telemetry Port
pub trait TelemetryPort: Send + Sync {
    fn record(&self, event: TelemetryEvent);
}

/// 丢弃所有事件
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetryPort for NoopTelemetry {
    fn record(&self, _event: TelemetryEvent) {}
}
