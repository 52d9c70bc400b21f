use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::EntityStatus;

/// User record in the database. Only active rows are ever selected.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, not exposed in JSON
    pub avatar: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, username, email, password_hash, avatar, created_at, updated_at";

pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND status = $2"
    ))
    .bind(id)
    .bind(EntityStatus::Active)
    .fetch_optional(db)
    .await
}

pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND status = $2"
    ))
    .bind(username)
    .bind(EntityStatus::Active)
    .fetch_optional(db)
    .await
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND status = $2"
    ))
    .bind(email)
    .bind(EntityStatus::Active)
    .fetch_optional(db)
    .await
}

/// True when another active user already holds the email.
pub async fn email_taken_by_other(
    db: &PgPool,
    email: &str,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2 AND status = $3)",
    )
    .bind(email)
    .bind(user_id)
    .bind(EntityStatus::Active)
    .fetch_one(db)
    .await
}

pub async fn insert(
    db: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    avatar: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, password_hash, avatar)
         VALUES ($1, $2, $3, $4)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(avatar)
    .fetch_one(db)
    .await
}

/// Updates email and avatar; absent fields keep their stored values.
pub async fn update_profile(
    db: &PgPool,
    id: Uuid,
    email: Option<&str>,
    avatar: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users
         SET email = COALESCE($2, email),
             avatar = COALESCE($3, avatar),
             updated_at = now()
         WHERE id = $1 AND status = $4
         RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(email)
    .bind(avatar)
    .bind(EntityStatus::Active)
    .fetch_optional(db)
    .await
}

pub async fn soft_delete(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET status = $2, updated_at = now() WHERE id = $1 AND status = $3",
    )
    .bind(id)
    .bind(EntityStatus::Deleted)
    .bind(EntityStatus::Active)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(db: &PgPool, keyword: Option<&str>) -> Result<i64, sqlx::Error> {
    let pattern = keyword.map(|k| format!("%{k}%"));
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM users
         WHERE status = $1
           AND ($2::text IS NULL OR username LIKE $2 OR email LIKE $2)",
    )
    .bind(EntityStatus::Active)
    .bind(pattern)
    .fetch_one(db)
    .await
}

/// Keyword substring-matches username or email; newest first.
pub async fn list(
    db: &PgPool,
    keyword: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    let pattern = keyword.map(|k| format!("%{k}%"));
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE status = $1
           AND ($2::text IS NULL OR username LIKE $2 OR email LIKE $2)
         ORDER BY created_at DESC
         LIMIT $3 OFFSET $4"
    ))
    .bind(EntityStatus::Active)
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_never_serializes() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            avatar: "https://example.com/default-avatar.png".into(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("alice"));
    }
}
