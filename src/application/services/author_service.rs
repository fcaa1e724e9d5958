//! Author Service - 作者领域服务

use std::sync::Arc;

use async_trait::async_trait;

use super::Operation;
use crate::application::commands::{CreateAuthor, DeleteAuthor, UpdateAuthor};
use crate::application::context::RequestContext;
use crate::application::ports::{AuthorProvider, AuthorRepositoryPort, TelemetryPort};
use crate::application::queries::{GetAuthor, GetAuthorBySlug, ListAuthors};
use crate::application::retry::RetryPolicy;
use crate::domain::{Author, AuthorId, DomainError};

/// 作者领域服务
pub struct AuthorService {
    repo: Arc<dyn AuthorRepositoryPort>,
    retry: RetryPolicy,
    telemetry: Arc<dyn TelemetryPort>,
}

impl AuthorService {
    pub fn new(
        repo: Arc<dyn AuthorRepositoryPort>,
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
        command: CreateAuthor,
    ) -> Result<Author, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "author.create",
            vec![("slug", command.slug.clone())],
        );

        op.observe(async {
            let author = Author::new(
                &command.first_name,
                &command.last_name,
                &command.profile_image_url,
                &command.slug,
            )?;

            let repo = &self.repo;
            let author = &author;
            let created = self
                .retry
                .run("author.create", ctx.cancellation(), move || async move {
                    repo.create(author).await
                })
                .await;

            if let Ok(created) = &created {
                tracing::info!(
                    request_id = %ctx.request_id(),
                    author_id = %created.id(),
                    slug = %created.slug(),
                    "Author created"
                );
            }
            created
        })
        .await
    }

    /// 每次尝试都重新读取作者后再修改，不提交过期的副本
    pub async fn update(
        &self,
        ctx: &RequestContext,
        command: UpdateAuthor,
    ) -> Result<Author, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "author.update",
            vec![("author_id", command.id.to_string())],
        );

        let repo = &self.repo;
        let command = &command;
        op.observe(self.retry.run(
            "author.update",
            ctx.cancellation(),
            move || async move {
                let mut author = repo.get_by_id(command.id).await?;
                author.update(
                    &command.first_name,
                    &command.last_name,
                    &command.profile_image_url,
                )?;
                repo.update(&author).await
            },
        ))
        .await
    }

    pub async fn delete(
        &self,
        ctx: &RequestContext,
        command: DeleteAuthor,
    ) -> Result<(), DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "author.delete",
            vec![("author_id", command.id.to_string())],
        );

        let repo = &self.repo;
        op.observe(
            self.retry
                .run("author.delete", ctx.cancellation(), move || async move {
                    repo.delete(command.id).await
                }),
        )
        .await
    }

    pub async fn get_by_id(
        &self,
        ctx: &RequestContext,
        query: GetAuthor,
    ) -> Result<Author, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "author.fetch",
            vec![("author_id", query.id.to_string())],
        );

        let repo = &self.repo;
        op.observe(
            self.retry
                .run("author.fetch", ctx.cancellation(), move || async move {
                    repo.get_by_id(query.id).await
                }),
        )
        .await
    }

    pub async fn get_by_slug(
        &self,
        ctx: &RequestContext,
        query: GetAuthorBySlug,
    ) -> Result<Author, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "author.fetch_by_slug",
            vec![("slug", query.slug.clone())],
        );

        let repo = &self.repo;
        let slug = query.slug.as_str();
        op.observe(
            self.retry
                .run("author.fetch_by_slug", ctx.cancellation(), move || async move {
                    repo.get_by_slug(slug).await
                }),
        )
        .await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: ListAuthors,
    ) -> Result<Vec<Author>, DomainError> {
        let op = Operation::start(
            self.telemetry.as_ref(),
            "author.list",
            vec![
                ("limit", query.page.limit.to_string()),
                ("offset", query.page.offset.to_string()),
            ],
        );

        let repo = &self.repo;
        op.observe(
            self.retry
                .run("author.list", ctx.cancellation(), move || async move {
                    repo.list(query.page).await
                }),
        )
        .await
    }
}

#[async_trait]
impl AuthorProvider for AuthorService {
    async fn get_author(&self, ctx: &RequestContext, id: AuthorId) -> Result<Author, DomainError> {
        self.get_by_id(ctx, GetAuthor { id }).await
    }
}
