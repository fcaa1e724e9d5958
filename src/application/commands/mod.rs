//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：由领域服务执行

mod author_commands;
mod story_commands;

pub use author_commands::*;
pub use story_commands::*;
