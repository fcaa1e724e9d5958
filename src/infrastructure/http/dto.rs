//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::errno;
use crate::domain::{Author, Story};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }

    /// 部分成功：数据可用，但有次要部分失败
    pub fn partial(data: T, error: impl Into<String>) -> Self {
        Self {
            errno: errno::PARTIAL_CONTENT,
            error: error.into(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Story DTOs
// ============================================================================

/// v1.2 查询参数
#[derive(Debug, Deserialize)]
pub struct LegacyStoryQuery {
    pub id: Option<String>,
}

/// v2.0 投影请求体
#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    /// 字段选择树，缺省时得到空对象
    #[serde(default)]
    pub fields: Value,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<&Story> for StoryResponse {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id().value(),
            title: story.title().to_string(),
            content: story.content().to_string(),
            author_id: story.author_id().value(),
            created_at: story.created_at(),
            updated_at: story.updated_at(),
            published_at: story.published_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub profile_image_url: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id().value(),
            first_name: author.first_name().to_string(),
            last_name: author.last_name().to_string(),
            profile_image_url: author.profile_image_url().to_string(),
            slug: author.slug().to_string(),
            created_at: author.created_at(),
            updated_at: author.updated_at(),
        }
    }
}

/// v2.0 完整详情，部分成功时 author 为 null
#[derive(Debug, Serialize)]
pub struct StoryDetailsResponse {
    pub story: StoryResponse,
    pub author: Option<AuthorResponse>,
}
