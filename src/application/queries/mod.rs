//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：由领域服务和聚合服务执行

mod author_queries;
mod story_queries;

pub use author_queries::*;
pub use story_queries::*;
