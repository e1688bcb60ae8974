use chrono::{DateTime, Utc};
use content_core::error::AppError;
use content_core::models::{Content, ContentChanges, NewContent, Page, PageRequest};
use sqlx::{PgPool, Pool, Postgres, QueryBuilder};

const CONTENT_COLUMNS: &str =
    "id, title, description, subtitle, thumb, source, created_at, updated_at";

/// Repository for content persistence in PostgreSQL.
#[derive(Clone)]
pub struct ContentRepository {
    pool: Pool<Postgres>,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new row, stamping both timestamps with the current time.
    pub async fn insert(&self, content: &NewContent) -> Result<Content, AppError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            INSERT INTO contents (title, description, subtitle, thumb, source, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {CONTENT_COLUMNS}
            "#
        ))
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.subtitle)
        .bind(&content.thumb)
        .bind(&content.source)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Content>, AppError> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Update only the columns present in `changes` and refresh `updated_at`.
    /// An empty change set still bumps `updated_at`.
    pub async fn update_by_id(
        &self,
        id: i64,
        changes: &ContentChanges,
    ) -> Result<Option<Content>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE contents SET ");
        let mut set = query.separated(", ");
        if let Some(title) = &changes.title {
            set.push("title = ").push_bind_unseparated(title.as_str());
        }
        if let Some(description) = &changes.description {
            set.push("description = ")
                .push_bind_unseparated(description.as_deref());
        }
        if let Some(subtitle) = &changes.subtitle {
            set.push("subtitle = ")
                .push_bind_unseparated(subtitle.as_deref());
        }
        if let Some(thumb) = &changes.thumb {
            set.push("thumb = ").push_bind_unseparated(thumb.as_deref());
        }
        if let Some(source) = &changes.source {
            set.push("source = ").push_bind_unseparated(source.as_str());
        }
        set.push("updated_at = ").push_bind_unseparated(Utc::now());

        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(format!(" RETURNING {CONTENT_COLUMNS}"));

        let row = query
            .build_query_as::<ContentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Delete a row. Returns whether a row was removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// One page of rows ordered by id, with the total row count.
    pub async fn list_paginated(&self, page: PageRequest) -> Result<Page<Content>, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents ORDER BY id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(page.per_page))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            total: u64::try_from(total).unwrap_or(0),
            per_page: page.per_page,
            current_page: page.page,
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Content>, AppError> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ContentRow {
    id: i64,
    title: String,
    description: Option<String>,
    subtitle: Option<String>,
    thumb: Option<String>,
    source: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ContentRow> for Content {
    fn from(row: ContentRow) -> Self {
        Content {
            id: row.id,
            title: row.title,
            description: row.description,
            subtitle: row.subtitle,
            thumb: row.thumb,
            source: row.source,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// -- Trait implementation --

impl content_core::traits::ContentStore for ContentRepository {
    async fn insert(&self, content: &NewContent) -> Result<Content, AppError> {
        ContentRepository::insert(self, content).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Content>, AppError> {
        ContentRepository::find_by_id(self, id).await
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: &ContentChanges,
    ) -> Result<Option<Content>, AppError> {
        ContentRepository::update_by_id(self, id, changes).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        ContentRepository::delete_by_id(self, id).await
    }

    async fn list_paginated(&self, page: PageRequest) -> Result<Page<Content>, AppError> {
        ContentRepository::list_paginated(self, page).await
    }

    async fn list_all(&self) -> Result<Vec<Content>, AppError> {
        ContentRepository::list_all(self).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        ContentRepository::health_check(self).await
    }
}
