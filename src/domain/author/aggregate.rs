//! Author Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{AuthorId, AuthorViolation};
use crate::domain::error::DomainError;

const FIRST_NAME_MIN_CHARS: usize = 3;
const SLUG_MIN_CHARS: usize = 8;

/// Author 实体
///
/// 不变量:
/// - 任何存活的 Author 都已通过全部校验
/// - 每次修改都重新校验全部字段
/// - slug 全局唯一（由存储层保证，冲突以校验错误返回）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    id: AuthorId,
    first_name: String,
    last_name: String,
    profile_image_url: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Author {
    /// 创建新作者
    pub fn new(
        first_name: &str,
        last_name: &str,
        profile_image_url: &str,
        slug: &str,
    ) -> Result<Self, DomainError> {
        validate_inputs(first_name, last_name, profile_image_url, slug)?;
        let now = Utc::now();
        Ok(Self {
            id: AuthorId::UNASSIGNED,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            profile_image_url: profile_image_url.to_string(),
            slug: slug.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// 从存储记录重建
    pub fn restore(
        id: AuthorId,
        first_name: String,
        last_name: String,
        profile_image_url: String,
        slug: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_inputs(&first_name, &last_name, &profile_image_url, &slug)?;
        Ok(Self {
            id,
            first_name,
            last_name,
            profile_image_url,
            slug,
            created_at,
            updated_at,
        })
    }

    /// 更新姓名和头像，slug 保持不变
    pub fn update(
        &mut self,
        first_name: &str,
        last_name: &str,
        profile_image_url: &str,
    ) -> Result<(), DomainError> {
        validate_inputs(first_name, last_name, profile_image_url, &self.slug)?;
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self.profile_image_url = profile_image_url.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 持久化后赋予 ID
    pub fn with_id(mut self, id: AuthorId) -> Self {
        self.id = id;
        self
    }

    // Getters
    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// 展示用全名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn profile_image_url(&self) -> &str {
        &self.profile_image_url
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// 按固定顺序校验: 名 → 姓 → 头像 URL → slug
fn validate_inputs(
    first_name: &str,
    last_name: &str,
    profile_image_url: &str,
    slug: &str,
) -> Result<(), AuthorViolation> {
    if first_name.chars().count() < FIRST_NAME_MIN_CHARS {
        return Err(AuthorViolation::FirstNameTooShort);
    }

    if last_name.is_empty() {
        return Err(AuthorViolation::EmptyLastName);
    }

    if !is_absolute_url(profile_image_url) {
        return Err(AuthorViolation::InvalidProfileImage);
    }

    if slug.chars().count() < SLUG_MIN_CHARS {
        return Err(AuthorViolation::SlugTooShort);
    }

    Ok(())
}

/// 绝对 URL：可解析、有 host（排除 `mailto:` 之类）
fn is_absolute_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}
