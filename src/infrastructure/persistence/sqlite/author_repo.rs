//! SQLite Author Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::classifier::{classify, DriverSignal};
use super::DbPool;
use crate::application::ports::{AuthorRepositoryPort, Page};
use crate::domain::author::AuthorViolation;
use crate::domain::{Author, AuthorId, DomainError};

const RESOURCE: &str = "author";

const SELECT_COLUMNS: &str =
    "SELECT id, first_name, last_name, profile_image_url, slug, created_at, updated_at FROM authors";

/// SQLite Author Repository
pub struct SqliteAuthorRepository {
    pool: DbPool,
}

impl SqliteAuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AuthorRow {
    id: i64,
    first_name: String,
    last_name: String,
    profile_image_url: String,
    slug: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<AuthorRow> for Author {
    type Error = DomainError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Author::restore(
            AuthorId::new(id as u64),
            row.first_name,
            row.last_name,
            row.profile_image_url,
            row.slug,
            parse_timestamp(&row.created_at)?,
            parse_timestamp(&row.updated_at)?,
        )
        .map_err(|e| corrupt_row(RESOURCE, id, e))
    }
}

/// 已存储的行不满足实体约束时按服务端数据故障处理，校验信息只进入原因链
pub(super) fn corrupt_row(resource: &'static str, id: i64, err: DomainError) -> DomainError {
    tracing::error!(
        resource,
        row_id = id,
        error = %err.diagnostic(),
        "Stored row violates entity invariants"
    );
    DomainError::unexpected(err)
}

pub(super) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(DomainError::unexpected)
}

/// 唯一约束冲突带上具体的 slug
fn classify_write(err: sqlx::Error, author: &Author) -> DomainError {
    match DriverSignal::from_sqlx(&err) {
        DriverSignal::UniqueViolation => AuthorViolation::AlreadyExists(author.slug().to_string()).into(),
        _ => classify(err, RESOURCE, &author.id().to_string()),
    }
}

#[async_trait]
impl AuthorRepositoryPort for SqliteAuthorRepository {
    async fn create(&self, author: &Author) -> Result<Author, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO authors (first_name, last_name, profile_image_url, slug, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(author.first_name())
        .bind(author.last_name())
        .bind(author.profile_image_url())
        .bind(author.slug())
        .bind(author.created_at().to_rfc3339())
        .bind(author.updated_at().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write(e, author))?;

        let id = AuthorId::new(result.last_insert_rowid() as u64);
        tracing::debug!(author_id = %id, slug = %author.slug(), "Author row inserted");
        Ok(author.clone().with_id(id))
    }

    async fn update(&self, author: &Author) -> Result<Author, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET first_name = ?, last_name = ?, profile_image_url = ?, slug = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(author.first_name())
        .bind(author.last_name())
        .bind(author.profile_image_url())
        .bind(author.slug())
        .bind(author.updated_at().to_rfc3339())
        .bind(author.id().value() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write(e, author))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(RESOURCE, author.id()));
        }
        Ok(author.clone())
    }

    async fn delete(&self, id: AuthorId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id.value() as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, RESOURCE, &id.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(RESOURCE, id));
        }
        Ok(())
    }

    async fn get_by_id(&self, id: AuthorId) -> Result<Author, DomainError> {
        let row: AuthorRow = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.value() as i64)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, RESOURCE, &id.to_string()))?;

        Author::try_from(row)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Author, DomainError> {
        let row: AuthorRow = sqlx::query_as(&format!("{} WHERE slug = ?", SELECT_COLUMNS))
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, RESOURCE, slug))?;

        Author::try_from(row)
    }

    async fn list(&self, page: Page) -> Result<Vec<Author>, DomainError> {
        let rows: Vec<AuthorRow> = sqlx::query_as(&format!(
            "{} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        ))
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, RESOURCE, "list"))?;

        rows.into_iter().map(Author::try_from).collect()
    }
}
