//! Story Context - Errors

use thiserror::Error;

use crate::domain::error::DomainError;

/// Story 不变量违反
///
/// 变体顺序即校验顺序。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryViolation {
    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("title must be at least 3 characters long")]
    TitleTooShort,

    #[error("title cannot exceed 255 characters")]
    TitleTooLong,

    #[error("content cannot be empty")]
    EmptyContent,

    #[error("content must be at least 10 characters long")]
    ContentTooShort,

    #[error("author ID cannot be empty")]
    EmptyAuthor,

    #[error("invalid author ID format")]
    InvalidAuthor,

    #[error("cannot publish story without title or content")]
    NotPublishable,
}

impl From<StoryViolation> for DomainError {
    fn from(violation: StoryViolation) -> Self {
        DomainError::validation(violation.to_string())
    }
}
