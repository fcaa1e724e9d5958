//! 应用服务
//!
//! - author_service / story_service: 领域服务，封装仓储调用、重试和可观测事件
//! - story_display: 聚合服务，组合故事和作者，允许部分成功

mod author_service;
mod story_display;
mod story_service;

#[cfg(test)]
pub(crate) mod testing;

pub use author_service::AuthorService;
pub use story_display::{DisplayDetails, StoryDisplayService};
pub use story_service::StoryService;

use std::future::Future;
use std::time::Instant;

use crate::application::ports::{Outcome, TelemetryEvent, TelemetryPort};
use crate::domain::{DomainError, ErrorKind};

// ============================================================================
// Operation - 单次服务操作的可观测包装
// ============================================================================

/// 记录一次操作的 attempt / success / error 事件
pub(crate) struct Operation<'a> {
    telemetry: &'a dyn TelemetryPort,
    name: &'static str,
    fields: Vec<(&'static str, String)>,
    started: Instant,
}

impl<'a> Operation<'a> {
    pub(crate) fn start(
        telemetry: &'a dyn TelemetryPort,
        name: &'static str,
        fields: Vec<(&'static str, String)>,
    ) -> Self {
        telemetry.record(TelemetryEvent::new(name, Outcome::Attempt).with_fields(&fields));
        Self {
            telemetry,
            name,
            fields,
            started: Instant::now(),
        }
    }

    /// 执行并记录结果，错误原样返回
    pub(crate) async fn observe<T, Fut>(self, fut: Fut) -> Result<T, DomainError>
    where
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let result = fut.await;
        self.finish(&result);
        result
    }

    fn finish<T>(self, result: &Result<T, DomainError>) {
        let elapsed = self.started.elapsed();
        let event = match result {
            Ok(_) => TelemetryEvent::new(self.name, Outcome::Success),
            Err(err) => {
                match err.kind() {
                    ErrorKind::NotFound | ErrorKind::Validation => tracing::warn!(
                        operation = self.name,
                        error_type = %err.kind(),
                        error = %err,
                        "Operation rejected"
                    ),
                    ErrorKind::Transient | ErrorKind::Unexpected => tracing::error!(
                        operation = self.name,
                        error_type = %err.kind(),
                        error = %err.diagnostic(),
                        "Operation failed"
                    ),
                }
                TelemetryEvent::new(self.name, Outcome::Error).with_error_kind(err.kind())
            }
        };

        self.telemetry
            .record(event.with_fields(&self.fields).with_duration(elapsed));
    }
}
