//! Story Queries

use crate::application::ports::Page;
use crate::domain::{AuthorId, StoryId};

/// 根据 ID 获取故事
#[derive(Debug, Clone, Copy)]
pub struct GetStory {
    pub id: StoryId,
}

/// 分页列出故事
#[derive(Debug, Clone, Copy, Default)]
pub struct ListStories {
    pub page: Page,
}

/// 分页列出某作者的故事
#[derive(Debug, Clone, Copy)]
pub struct ListStoriesByAuthor {
    pub author_id: AuthorId,
    pub page: Page,
}

/// 获取故事展示详情（故事 + 作者，允许部分成功）
#[derive(Debug, Clone, Copy)]
pub struct GetStoryDisplayDetails {
    pub story_id: StoryId,
}
