//! 响应投影
//!
//! 客户端通过字段选择树决定响应中出现哪些字段。

mod builder;
mod selection;

pub use builder::{
    full_selection, legacy_selection, project, project_author, AuthorProjection, StoryProjection,
};
pub use selection::{FieldSelector, Selection, MAX_DEPTH};
