//! Retry Policy - 按错误种类门控的有限重试
//!
//! 规则:
//! - 只有 `ErrorKind::Transient` 会触发重试，其他种类立即返回
//! - 第 n 次失败后等待 `n × base_delay`（线性退避）
//! - 达到 `max_attempts` 次调用后返回 "operation failed after retries"，
//!   最后一次瞬时错误只写日志，不返回给调用方
//! - 每次等待前后都检查取消令牌

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::DomainError;

/// 退避等待端口
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// 基于 tokio 定时器的实现，只挂起当前任务
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 重试策略
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .finish()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_BASE_DELAY)
    }
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

    /// `max_attempts` 至少为 1
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 第 `attempt` 次失败后的等待时间（attempt 从 1 开始）
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// 执行操作
    ///
    /// `op` 每次重试都会被重新调用，更新类操作应在闭包内重新读取实体，
    /// 不要重复提交上一次的内存副本。
    pub async fn run<T, F, Fut>(
        &self,
        operation: &'static str,
        cancel: &CancellationToken,
        mut op: F,
    ) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                tracing::info!(operation, attempt, "Operation cancelled before attempt");
                return Err(DomainError::cancelled());
            }

            attempt += 1;
            let err = match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(operation, attempt, "Operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) => err,
            };

            let delay = self.backoff(attempt);
            tracing::warn!(
                operation,
                attempt,
                max_attempts = self.max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %err.diagnostic(),
                "Transient failure, backing off"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(operation, attempt, "Operation cancelled during backoff");
                    return Err(DomainError::cancelled());
                }
                _ = self.sleeper.sleep(delay) => {}
            }

            if attempt >= self.max_attempts {
                tracing::warn!(
                    operation,
                    attempts = attempt,
                    last_error = %err.diagnostic(),
                    "Retries exhausted"
                );
                return Err(DomainError::retries_exhausted());
            }
        }
    }
}
