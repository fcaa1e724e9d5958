//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口，具体实现在 infrastructure 层（SQLite）。
//!
//! 约定：所有方法只返回 `DomainError`，驱动层错误必须在实现内部完成分类。

use async_trait::async_trait;

use crate::domain::{Author, AuthorId, DomainError, Story, StoryId};

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    /// 单页上限
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: limit.clamp(1, Self::MAX_LIMIT),
            offset,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(20, 0)
    }
}

// ============================================================================
// Author Repository
// ============================================================================

/// Author Repository Port
#[async_trait]
pub trait AuthorRepositoryPort: Send + Sync {
    /// 新建作者，返回带 ID 的实体
    async fn create(&self, author: &Author) -> Result<Author, DomainError>;

    /// 保存已有作者
    async fn update(&self, author: &Author) -> Result<Author, DomainError>;

    /// 删除作者
    async fn delete(&self, id: AuthorId) -> Result<(), DomainError>;

    /// 根据 ID 查找作者，不存在时返回 NotFound
    async fn get_by_id(&self, id: AuthorId) -> Result<Author, DomainError>;

    /// 根据 slug 查找作者
    async fn get_by_slug(&self, slug: &str) -> Result<Author, DomainError>;

    /// 分页列出作者（按创建时间倒序）
    async fn list(&self, page: Page) -> Result<Vec<Author>, DomainError>;
}

// ============================================================================
// Story Repository
// ============================================================================

/// Story Repository Port
#[async_trait]
pub trait StoryRepositoryPort: Send + Sync {
    /// 新建故事，返回带 ID 的实体
    async fn create(&self, story: &Story) -> Result<Story, DomainError>;

    /// 保存已有故事
    async fn update(&self, story: &Story) -> Result<Story, DomainError>;

    /// 删除故事
    async fn delete(&self, id: StoryId) -> Result<(), DomainError>;

    /// 根据 ID 查找故事，不存在时返回 NotFound
    async fn get_by_id(&self, id: StoryId) -> Result<Story, DomainError>;

    /// 分页列出故事（按创建时间倒序）
    async fn list(&self, page: Page) -> Result<Vec<Story>, DomainError>;

    /// 分页列出某作者的故事
    async fn list_by_author(
        &self,
        author_id: AuthorId,
        page: Page,
    ) -> Result<Vec<Story>, DomainError>;
}
