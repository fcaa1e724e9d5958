//! HTTP Handlers

mod health;
mod metrics;
mod story;

pub use health::*;
pub use metrics::*;
pub use story::*;
