//! Author Queries

use crate::application::ports::Page;
use crate::domain::AuthorId;

/// 根据 ID 获取作者
#[derive(Debug, Clone, Copy)]
pub struct GetAuthor {
    pub id: AuthorId,
}

/// 根据 slug 获取作者
#[derive(Debug, Clone)]
pub struct GetAuthorBySlug {
    pub slug: String,
}

/// 分页列出作者
#[derive(Debug, Clone, Copy, Default)]
pub struct ListAuthors {
    pub page: Page,
}
