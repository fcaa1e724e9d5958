//! Domain Layer - 领域层
//!
//! 包含两个限界上下文和共享的错误分类:
//! - Author Context: 作者管理
//! - Story Context: 故事管理
//! - error: ErrorKind / DomainError

pub mod author;
pub mod error;
pub mod story;

pub use author::{Author, AuthorId};
pub use error::{DomainError, ErrorKind};
pub use story::{Story, StoryId};
