//! Author Context - 作者限界上下文
//!
//! 职责:
//! - Author 实体及其不变量
//! - Slug 唯一性约束的错误表达

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::Author;
pub use errors::AuthorViolation;
pub use value_objects::AuthorId;
