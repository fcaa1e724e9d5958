//! Data Provider Ports
//!
//! 聚合服务只依赖这两个读取端口，而不直接依赖具体的领域服务。

use async_trait::async_trait;

use crate::application::context::RequestContext;
use crate::domain::{Author, AuthorId, DomainError, Story, StoryId};

/// 故事读取端口
#[async_trait]
pub trait StoryProvider: Send + Sync {
    async fn get_story(&self, ctx: &RequestContext, id: StoryId) -> Result<Story, DomainError>;
}

/// 作者读取端口
#[async_trait]
pub trait AuthorProvider: Send + Sync {
    async fn get_author(&self, ctx: &RequestContext, id: AuthorId)
        -> Result<Author, DomainError>;
}
