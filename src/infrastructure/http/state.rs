//! Application State
//!
//! 组合根：显式构造所有服务，路由通过 `Arc<AppState>` 共享

use std::sync::Arc;

use crate::application::{
    AuthorRepositoryPort, AuthorService, RetryPolicy, StoryDisplayService, StoryRepositoryPort,
    StoryService,
};
use crate::infrastructure::telemetry::TracingTelemetry;

/// 应用状态
pub struct AppState {
    // ========== Services ==========
    pub story_service: Arc<StoryService>,
    pub author_service: Arc<AuthorService>,
    pub display_service: StoryDisplayService,

    // ========== Observability ==========
    pub telemetry: Arc<TracingTelemetry>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        story_repo: Arc<dyn StoryRepositoryPort>,
        author_repo: Arc<dyn AuthorRepositoryPort>,
        retry: RetryPolicy,
        telemetry: Arc<TracingTelemetry>,
    ) -> Self {
        let story_service = Arc::new(StoryService::new(
            story_repo,
            retry.clone(),
            telemetry.clone(),
        ));
        let author_service = Arc::new(AuthorService::new(author_repo, retry, telemetry.clone()));
        let display_service = StoryDisplayService::new(story_service.clone(), author_service.clone());

        Self {
            story_service,
            author_service,
            display_service,
            telemetry,
        }
    }
}
