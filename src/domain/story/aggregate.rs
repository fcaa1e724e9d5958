//! Story Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{StoryId, StoryViolation};
use crate::domain::author::AuthorId;
use crate::domain::error::DomainError;

const TITLE_MIN_CHARS: usize = 3;
const TITLE_MAX_CHARS: usize = 255;
const CONTENT_MIN_CHARS: usize = 10;

/// Story 实体
///
/// 不变量:
/// - 任何存活的 Story 都已通过全部校验
/// - author_id 只是外部引用，不在此处解析
/// - published_at 只能通过 `publish` 设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    id: StoryId,
    title: String,
    content: String,
    author_id: AuthorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
}

impl Story {
    /// 从原始输入创建故事
    ///
    /// 作者引用以字符串形式传入，格式错误同样属于校验错误。
    pub fn new(title: &str, content: &str, author_ref: &str) -> Result<Self, DomainError> {
        let author_id = validate_inputs(title, content, author_ref)?;
        let now = Utc::now();
        Ok(Self {
            id: StoryId::UNASSIGNED,
            title: title.to_string(),
            content: content.to_string(),
            author_id,
            created_at: now,
            updated_at: now,
            published_at: None,
        })
    }

    /// 从存储记录重建，不重新生成时间戳
    ///
    /// 仍然执行完整校验，存储中的脏数据不会变成存活实体。
    pub fn restore(
        id: StoryId,
        title: String,
        content: String,
        author_id: AuthorId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        validate_inputs(&title, &content, &author_id.to_string())?;
        Ok(Self {
            id,
            title,
            content,
            author_id,
            created_at,
            updated_at,
            published_at,
        })
    }

    /// 更新标题和正文
    pub fn update(&mut self, title: &str, content: &str) -> Result<(), DomainError> {
        validate_inputs(title, content, &self.author_id.to_string())?;
        self.title = title.to_string();
        self.content = content.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 发布
    ///
    /// 每次调用都会把 published_at 刷新为当前时间，已发布的故事再次发布同样如此。
    pub fn publish(&mut self) -> Result<(), DomainError> {
        if self.title.is_empty() || self.content.is_empty() {
            return Err(StoryViolation::NotPublishable.into());
        }
        let now = Utc::now();
        self.published_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// 持久化后赋予 ID
    pub fn with_id(mut self, id: StoryId) -> Self {
        self.id = id;
        self
    }

    // Getters
    pub fn id(&self) -> StoryId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_id(&self) -> AuthorId {
        self.author_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

/// 按固定顺序校验原始输入，返回解析后的作者 ID
///
/// 顺序: 标题非空 → 标题下限 → 标题上限 → 正文非空 → 正文下限 → 作者引用非空 → 作者引用格式
fn validate_inputs(title: &str, content: &str, author_ref: &str) -> Result<AuthorId, StoryViolation> {
    let title_chars = title.chars().count();
    if title_chars == 0 {
        return Err(StoryViolation::EmptyTitle);
    }
    if title_chars < TITLE_MIN_CHARS {
        return Err(StoryViolation::TitleTooShort);
    }
    if title_chars > TITLE_MAX_CHARS {
        return Err(StoryViolation::TitleTooLong);
    }

    let content_chars = content.chars().count();
    if content_chars == 0 {
        return Err(StoryViolation::EmptyContent);
    }
    if content_chars < CONTENT_MIN_CHARS {
        return Err(StoryViolation::ContentTooShort);
    }

    if author_ref.is_empty() {
        return Err(StoryViolation::EmptyAuthor);
    }
    match author_ref.parse::<u64>() {
        Ok(id) if id > 0 => Ok(AuthorId::new(id)),
        _ => Err(StoryViolation::InvalidAuthor),
    }
}
