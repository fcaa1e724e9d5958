//! Story Service - 故事领域服务

use std::sync::Arc;

use async_trait::async_trait;

use super::Operation;
use crate::application::commands::{CreateStory, DeleteStory, PublishStory, UpdateStory};
use crate::application::context::RequestContext;
use crate::application::ports::{StoryProvider, StoryRepositoryPort, TelemetryPort};
use crate::application::queries::{GetStory, ListStories, ListStoriesByAuthor};
use crate::application::retry::RetryPolicy;
use crate::domain::{DomainError, Story, StoryId};

/// 故事领域服务
pub struct StoryService {
    repo: Arc<dyn StoryRepositoryPort>,
    retry: RetryPolicy,
    telemetry: Arc<dyn TelemetryPort>,
}

impl StoryService {
    pub fn new(
        repo: Arc<dyn StoryRepositoryPort>,
        retry: RetryPolicy,
        telemetry: Arc<dyn TelemetryPort>,
    ) -> Self {
        Self {
            repo,
            retry,
            telemetry,
        }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        command: CreateStory,
    ) -> Result<Story, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "story.create",
            vec![("author_id", command.author_id.clone())],
        );

        op.observe(async {
            let story = Story::new(&command.title, &command.content, &command.author_id)?;

            let repo = &self.repo;
            let story = &story;
            let created = self
                .retry
                .run("story.create", ctx.cancellation(), move || async move {
                    repo.create(story).await
                })
                .await;

            if let Ok(created) = &created {
                tracing::info!(
                    request_id = %ctx.request_id(),
                    story_id = %created.id(),
                    author_id = %created.author_id(),
                    "Story created"
                );
            }
            created
        })
        .await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        command: UpdateStory,
    ) -> Result<Story, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "story.update",
            vec![("story_id", command.id.to_string())],
        );

        let repo = &self.repo;
        let command = &command;
        op.observe(self.retry.run(
            "story.update",
            ctx.cancellation(),
            move || async move {
                let mut story = repo.get_by_id(command.id).await?;
                story.update(&command.title, &command.content)?;
                repo.update(&story).await
            },
        ))
        .await
    }

    /// 发布故事，重复发布会刷新发布时间
    pub async fn publish(
        &self,
        ctx: &RequestContext,
        command: PublishStory,
    ) -> Result<Story, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "story.publish",
            vec![("story_id", command.id.to_string())],
        );

        let repo = &self.repo;
        let published = op
            .observe(
                self.retry
                    .run("story.publish", ctx.cancellation(), move || async move {
                        let mut story = repo.get_by_id(command.id).await?;
                        story.publish()?;
                        repo.update(&story).await
                    }),
            )
            .await?;

        tracing::info!(
            request_id = %ctx.request_id(),
            story_id = %published.id(),
            "Story published"
        );
        Ok(published)
    }

    pub async fn delete(
        &self,
        ctx: &RequestContext,
        command: DeleteStory,
    ) -> Result<(), DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "story.delete",
            vec![("story_id", command.id.to_string())],
        );

        let repo = &self.repo;
        op.observe(
            self.retry
                .run("story.delete", ctx.cancellation(), move || async move {
                    repo.delete(command.id).await
                }),
        )
        .await
    }

    pub async fn get_by_id(
        &self,
        ctx: &RequestContext,
        query: GetStory,
    ) -> Result<Story, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "story.fetch",
            vec![("story_id", query.id.to_string())],
        );

        let repo = &self.repo;
        op.observe(
            self.retry
                .run("story.fetch", ctx.cancellation(), move || async move {
                    repo.get_by_id(query.id).await
                }),
        )
        .await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: ListStories,
    ) -> Result<Vec<Story>, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "story.list",
            vec![
                ("limit", query.page.limit.to_string()),
                ("offset", query.page.offset.to_string()),
            ],
        );

        let repo = &self.repo;
        op.observe(
            self.retry
                .run("story.list", ctx.cancellation(), move || async move {
                    repo.list(query.page).await
                }),
        )
        .await
    }

    pub async fn list_by_author(
        &self,
        ctx: &RequestContext,
        query: ListStoriesByAuthor,
    ) -> Result<Vec<Story>, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "story.list_by_author",
            vec![
                ("author_id", query.author_id.to_string()),
                ("limit", query.page.limit.to_string()),
                ("offset", query.page.offset.to_string()),
            ],
        );

        let repo = &self.repo;
        op.observe(self.retry.run(
            "story.list_by_author",
            ctx.cancellation(),
            move || async move { repo.list_by_author(query.author_id, query.page).await },
        ))
        .await
    }
}

#[async_trait]
impl StoryProvider for StoryService {
    async fn get_story(&self, ctx: &RequestContext, id: StoryId) -> Result<Story, DomainError> {
        self.get_by_id(ctx, GetStory { id }).await
    }
}
