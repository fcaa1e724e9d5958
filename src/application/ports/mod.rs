//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod providers;
mod repositories;
mod telemetry;

pub use providers::{AuthorProvider, StoryProvider};
pub use repositories::{AuthorRepositoryPort, Page, StoryRepositoryPort};
pub use telemetry::{NoopTelemetry, Outcome, TelemetryEvent, TelemetryPort};
