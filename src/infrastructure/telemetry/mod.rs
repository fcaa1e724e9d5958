//! Tracing Telemetry
//!
//! 每个事件输出一条结构化 tracing 日志，同时累计计数和耗时，供 `/metrics` 读取。

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

use crate::application::ports::{Outcome, TelemetryEvent, TelemetryPort};

/// 单个计数键的累计值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub count: u64,
    pub total_duration_ms: u64,
}

/// 所有计数的快照，按键排序
#[derive(Debug, Clone, Default, Serialize)]
pub struct TelemetrySnapshot {
    pub counters: BTreeMap<String, CounterSnapshot>,
    /// `op.error.<kind>` 形式的错误分类计数
    pub errors_by_kind: BTreeMap<String, u64>,
}

/// 基于 tracing 的遥测实现
#[derive(Default)]
pub struct TracingTelemetry {
    /// "story.fetch.success" -> 计数 / 耗时
    counters: DashMap<String, CounterSnapshot>,
    /// "story.fetch.error.transient" -> 计数
    errors_by_kind: DashMap<String, u64>,
}

impl TracingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn count(&self, key: &str) -> u64 {
        self.counters.get(key).map(|c| c.count).unwrap_or(0)
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            counters: self
                .counters
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
            errors_by_kind: self
                .errors_by_kind
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
        }
    }

    fn emit(event: &TelemetryEvent) {
        let fields = event
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        let duration_ms = event.duration.map(|d| d.as_millis() as u64);
        let error_type = event.error_kind.map(|k| k.as_str());

        match event.outcome {
            Outcome::Error => tracing::info!(
                target: "storyhub::telemetry",
                operation = event.operation,
                outcome = event.outcome.as_str(),
                error_type,
                duration_ms,
                fields = %fields,
                "Telemetry event"
            ),
            Outcome::Attempt | Outcome::Success => tracing::debug!(
                target: "storyhub::telemetry",
                operation = event.operation,
                outcome = event.outcome.as_str(),
                duration_ms,
                fields = %fields,
                "Telemetry event"
            ),
        }
    }
}

impl TelemetryPort for TracingTelemetry {
    fn record(&self, event: TelemetryEvent) {
        Self::emit(&event);

        let mut counter = self.counters.entry(event.metric_key()).or_default();
        counter.count += 1;
        if let Some(duration) = event.duration {
            counter.total_duration_ms += duration.as_millis() as u64;
        }
        drop(counter);

        if let Some(kind) = event.error_kind {
            *self
                .errors_by_kind
                .entry(format!("{}.{}", event.metric_key(), kind.as_str()))
                .or_insert(0) += 1;
        }
    }
}
