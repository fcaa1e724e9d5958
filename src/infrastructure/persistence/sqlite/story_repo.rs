//! SQLite Story Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::author_repo::{corrupt_row, parse_timestamp};
use super::classifier::classify;
use super::DbPool;
use crate::application::ports::{Page, StoryRepositoryPort};
use crate::domain::{AuthorId, DomainError, Story, StoryId};

const RESOURCE: &str = "story";

const SELECT_COLUMNS: &str =
    "SELECT id, title, content, author_id, created_at, updated_at, published_at FROM stories";

/// SQLite Story Repository
pub struct SqliteStoryRepository {
    pool: DbPool,
}

impl SqliteStoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct StoryRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    created_at: String,
    updated_at: String,
    published_at: Option<String>,
}

impl TryFrom<StoryRow> for Story {
    type Error = DomainError;

    fn try_from(row: StoryRow) -> Result<Self, Self::Error> {
        let published_at = row
            .published_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        let id = row.id;
        Story::restore(
            StoryId::new(id as u64),
            row.title,
            row.content,
            AuthorId::new(row.author_id as u64),
            parse_timestamp(&row.created_at)?,
            parse_timestamp(&row.updated_at)?,
            published_at,
        )
        .map_err(|e| corrupt_row(RESOURCE, id, e))
    }
}

#[async_trait]
impl StoryRepositoryPort for SqliteStoryRepository {
    async fn create(&self, story: &Story) -> Result<Story, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO stories (title, content, author_id, created_at, updated_at, published_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(story.title())
        .bind(story.content())
        .bind(story.author_id().value() as i64)
        .bind(story.created_at().to_rfc3339())
        .bind(story.updated_at().to_rfc3339())
        .bind(story.published_at().map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, RESOURCE, "new"))?;

        let id = StoryId::new(result.last_insert_rowid() as u64);
        tracing::debug!(story_id = %id, author_id = %story.author_id(), "Story row inserted");
        Ok(story.clone().with_id(id))
    }

    async fn update(&self, story: &Story) -> Result<Story, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE stories
            SET title = ?, content = ?, author_id = ?, updated_at = ?, published_at = ?
            WHERE id = ?
            "#,
        )
        .bind(story.title())
        .bind(story.content())
        .bind(story.author_id().value() as i64)
        .bind(story.updated_at().to_rfc3339())
        .bind(story.published_at().map(|t| t.to_rfc3339()))
        .bind(story.id().value() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, RESOURCE, &story.id().to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(RESOURCE, story.id()));
        }
        Ok(story.clone())
    }

    async fn delete(&self, id: StoryId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM stories WHERE id = ?")
            .bind(id.value() as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, RESOURCE, &id.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(RESOURCE, id));
        }
        Ok(())
    }

    async fn get_by_id(&self, id: StoryId) -> Result<Story, DomainError> {
        let row: StoryRow = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.value() as i64)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, RESOURCE, &id.to_string()))?;

        Story::try_from(row)
    }

    async fn list(&self, page: Page) -> Result<Vec<Story>, DomainError> {
        let rows: Vec<StoryRow> = sqlx::query_as(&format!(
            "{} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        ))
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, RESOURCE, "list"))?;

        rows.into_iter().map(Story::try_from).collect()
    }

    async fn list_by_author(
        &self,
        author_id: AuthorId,
        page: Page,
    ) -> Result<Vec<Story>, DomainError> {
        let rows: Vec<StoryRow> = sqlx::query_as(&format!(
            "{} WHERE author_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        ))
        .bind(author_id.value() as i64)
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, RESOURCE, &author_id.to_string()))?;

        rows.into_iter().map(Story::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    const CONTENT: &str = "Once upon a time, far away.";

    async fn repo() -> SqliteStoryRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteStoryRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repo().await;
        let created = repo
            .create(&Story::new("A Tale", CONTENT, "3").unwrap())
            .await
            .unwrap();

        let loaded = repo.get_by_id(created.id()).await.unwrap();
        assert_eq!(loaded, created);
        assert!(loaded.published_at().is_none());
    }

    #[tokio::test]
    async fn test_missing_story_is_not_found() {
        let repo = repo().await;
        let err = repo.get_by_id(StoryId::new(7)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "story not found: 7");
    }

    #[tokio::test]
    async fn test_publish_round_trips_timestamp() {
        let repo = repo().await;
        let mut story = repo
            .create(&Story::new("A Tale", CONTENT, "3").unwrap())
            .await
            .unwrap();

        story.publish().unwrap();
        repo.update(&story).await.unwrap();

        let loaded = repo.get_by_id(story.id()).await.unwrap();
        assert_eq!(loaded.published_at(), story.published_at());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = repo().await;
        let created = repo
            .create(&Story::new("A Tale", CONTENT, "3").unwrap())
            .await
            .unwrap();

        repo.delete(created.id()).await.unwrap();
        let err = repo.delete(created.id()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_by_author() {
        let repo = repo().await;
        for author in ["1", "2", "1", "1"] {
            repo.create(&Story::new("A Tale", CONTENT, author).unwrap())
                .await
                .unwrap();
        }

        assert_eq!(repo.list(Page::default()).await.unwrap().len(), 4);

        let by_author = repo
            .list_by_author(AuthorId::new(1), Page::new(2, 0))
            .await
            .unwrap();
        assert_eq!(by_author.len(), 2);
        assert!(by_author.iter().all(|s| s.author_id() == AuthorId::new(1)));
    }

    #[tokio::test]
    async fn test_row_breaking_invariants_is_unexpected() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO stories (title, content, author_id, created_at, updated_at) \
             VALUES ('', ?, 3, '2024-05-01T10:00:00Z', '2024-05-01T10:00:00Z')",
        )
        .bind(CONTENT)
        .execute(&repo.pool)
        .await
        .unwrap();

        let err = repo.get_by_id(StoryId::new(1)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.public_message(), "unexpected error occurred");
    }
}
