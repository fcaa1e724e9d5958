//! Author Context - Errors

use thiserror::Error;

use crate::domain::error::DomainError;

/// Author 不变量违反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorViolation {
    #[error("first name must be at least 3 characters long")]
    FirstNameTooShort,

    #[error("last name cannot be empty")]
    EmptyLastName,

    #[error("invalid profile image URL format")]
    InvalidProfileImage,

    #[error("slug must be at least 8 characters long")]
    SlugTooShort,

    #[error("author with slug '{0}' already exists")]
    AlreadyExists(String),
}

impl From<AuthorViolation> for DomainError {
    fn from(violation: AuthorViolation) -> Self {
        DomainError::validation(violation.to_string())
    }
}
