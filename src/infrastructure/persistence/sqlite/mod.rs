//! SQLite Persistence - SQLite 数据库持久化实现

mod author_repo;
mod classifier;
mod database;
mod story_repo;

pub use author_repo::*;
pub use classifier::{classify, DriverSignal};
pub use database::*;
pub use story_repo::*;
