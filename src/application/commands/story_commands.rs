//! Story Commands

use crate::domain::StoryId;

/// 创建故事命令
///
/// `author_id` 保持原始字符串，格式由 Story 实体校验。
#[derive(Debug, Clone)]
pub struct CreateStory {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

/// 更新故事命令
#[derive(Debug, Clone)]
pub struct UpdateStory {
    pub id: StoryId,
    pub title: String,
    pub content: String,
}

/// 发布故事命令
#[derive(Debug, Clone, Copy)]
pub struct PublishStory {
    pub id: StoryId,
}

/// 删除故事命令
#[derive(Debug, Clone, Copy)]
pub struct DeleteStory {
    pub id: StoryId,
}
