//! Author Commands

use crate::domain::AuthorId;

/// 创建作者命令
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub first_name: String,
    pub last_name: String,
    pub profile_image_url: String,
    pub slug: String,
}

/// 更新作者命令（slug 不可修改）
#[derive(Debug, Clone)]
pub struct UpdateAuthor {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    pub profile_image_url: String,
}

/// 删除作者命令
#[derive(Debug, Clone, Copy)]
pub struct DeleteAuthor {
    pub id: AuthorId,
}
