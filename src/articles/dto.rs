use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::articles::repo::{Article, ArticleWithAuthor};

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
}

/// Absent or empty fields keep the stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            user_id: a.user_id,
            author: None,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<ArticleWithAuthor> for ArticleResponse {
    fn from(a: ArticleWithAuthor) -> Self {
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            user_id: a.user_id,
            author: Some(Author {
                id: a.user_id,
                username: a.author_username,
                avatar: a.author_avatar,
            }),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}
