//! Story Context - 故事限界上下文
//!
//! 职责:
//! - Story 实体及其不变量
//! - 发布状态迁移

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::Story;
pub use errors::StoryViolation;
pub use value_objects::StoryId;
