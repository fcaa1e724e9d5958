//! StoryHub - 故事阅读 BFF 可靠性层
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Author Context: 作者实体与校验
//! - Story Context: 故事实体与校验
//! - error: 错误分类 (NotFound / Validation / Transient / Unexpected)
//!
//! 应用层 (application/):
//! - Ports: Repository、Provider、Telemetry 端口
//! - Services: 领域服务（带重试）与聚合服务（部分成功）
//! - Retry: 按错误种类门控的线性退避重试
//! - Projection: 字段选择与响应投影
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 版本化的只读 API
//! - Persistence: SQLite 存储与驱动错误分类
//! - Telemetry: tracing 事件与计数器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
