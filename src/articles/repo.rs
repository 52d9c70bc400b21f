use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::EntityStatus;

/// Article record in the database. Only active rows are ever selected.
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Article joined with its author's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub author_username: String,
    pub author_avatar: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const JOINED_COLUMNS: &str = "a.id, a.title, a.content, a.user_id, \
     u.username AS author_username, u.avatar AS author_avatar, \
     a.created_at, a.updated_at";

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Article, sqlx::Error> {
    sqlx::query_as::<_, Article>(
        "INSERT INTO articles (title, content, user_id)
         VALUES ($1, $2, $3)
         RETURNING id, title, content, user_id, created_at, updated_at",
    )
    .bind(title)
    .bind(content)
    .bind(user_id)
    .fetch_one(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(
        "SELECT id, title, content, user_id, created_at, updated_at
         FROM articles
         WHERE id = $1 AND status = $2",
    )
    .bind(id)
    .bind(EntityStatus::Active)
    .fetch_optional(db)
    .await
}

pub async fn find_with_author(
    db: &PgPool,
    id: Uuid,
) -> Result<Option<ArticleWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, ArticleWithAuthor>(&format!(
        "SELECT {JOINED_COLUMNS}
         FROM articles a
         JOIN users u ON u.id = a.user_id
         WHERE a.id = $1 AND a.status = $2"
    ))
    .bind(id)
    .bind(EntityStatus::Active)
    .fetch_optional(db)
    .await
}

/// Absent fields keep their stored values.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Option<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(
        "UPDATE articles
         SET title = COALESCE($2, title),
             content = COALESCE($3, content),
             updated_at = now()
         WHERE id = $1 AND status = $4
         RETURNING id, title, content, user_id, created_at, updated_at",
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(EntityStatus::Active)
    .fetch_optional(db)
    .await
}

pub async fn soft_delete(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE articles SET status = $2, updated_at = now() WHERE id = $1 AND status = $3",
    )
    .bind(id)
    .bind(EntityStatus::Deleted)
    .bind(EntityStatus::Active)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(db: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles WHERE status = $1")
        .bind(EntityStatus::Active)
        .fetch_one(db)
        .await
}

pub async fn list(
    db: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<ArticleWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, ArticleWithAuthor>(&format!(
        "SELECT {JOINED_COLUMNS}
         FROM articles a
         JOIN users u ON u.id = a.user_id
         WHERE a.status = $1
         ORDER BY a.created_at DESC
         LIMIT $2 OFFSET $3"
    ))
    .bind(EntityStatus::Active)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn count_by_user(db: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM articles WHERE user_id = $1 AND status = $2",
    )
    .bind(user_id)
    .bind(EntityStatus::Active)
    .fetch_one(db)
    .await
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<ArticleWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, ArticleWithAuthor>(&format!(
        "SELECT {JOINED_COLUMNS}
         FROM articles a
         JOIN users u ON u.id = a.user_id
         WHERE a.user_id = $1 AND a.status = $2
         ORDER BY a.created_at DESC
         LIMIT $3 OFFSET $4"
    ))
    .bind(user_id)
    .bind(EntityStatus::Active)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}
