//! Story Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::error::DomainError;

/// 故事唯一标识（存储层自增主键）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoryId(u64);

impl StoryId {
    /// 尚未持久化的故事
    pub const UNASSIGNED: StoryId = StoryId(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl From<u64> for StoryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for StoryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(DomainError::validation("invalid story ID format")),
        }
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
