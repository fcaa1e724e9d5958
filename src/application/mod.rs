//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、Provider、Telemetry）
//! - commands / queries: CQRS 命令与查询
//! - services: 领域服务与聚合服务
//! - retry: 按错误种类门控的重试策略
//! - projection: 字段选择与响应投影
//! - context: 请求级上下文

pub mod commands;
pub mod context;
pub mod ports;
pub mod projection;
pub mod queries;
pub mod retry;
pub mod services;

// Re-exports
pub use commands::{
    CreateAuthor, CreateStory, DeleteAuthor, DeleteStory, PublishStory, UpdateAuthor, UpdateStory,
};

pub use context::RequestContext;

pub use ports::{
    AuthorProvider, AuthorRepositoryPort, NoopTelemetry, Outcome, Page, StoryProvider,
    StoryRepositoryPort, TelemetryEvent, TelemetryPort,
};

pub use projection::{project, AuthorProjection, FieldSelector, Selection, StoryProjection};

pub use queries::{
    GetAuthor, GetAuthorBySlug, GetStory, GetStoryDisplayDetails, ListAuthors, ListStories,
    ListStoriesByAuthor,
};

pub use retry::{RetryPolicy, Sleeper, TokioSleeper};

pub use services::{AuthorService, DisplayDetails, StoryDisplayService, StoryService};
