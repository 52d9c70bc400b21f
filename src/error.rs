use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::response::ApiResponse;

/// Domain error taxonomy. Each variant carries a stable numeric code and an
/// HTTP status; storage failures are wrapped and never leak their text to
/// clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthorized,
    #[error("login has expired")]
    TokenExpired,
    #[error("permission denied")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("article not found")]
    ArticleNotFound,
    #[error("username already exists")]
    UsernameExists,
    #[error("email already registered")]
    EmailExists,
    #[error("internal server error")]
    Internal,
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidParam(_) | ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::UserNotFound | ApiError::ArticleNotFound => StatusCode::NOT_FOUND,
            ApiError::UsernameExists | ApiError::EmailExists => StatusCode::CONFLICT,
            ApiError::Internal | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ApiError::InvalidParam(_) => 40001,
            ApiError::InvalidCredentials => 40002,
            ApiError::Unauthorized => 40100,
            ApiError::TokenExpired => 40101,
            ApiError::Forbidden => 40300,
            ApiError::UserNotFound => 40401,
            ApiError::ArticleNotFound => 40402,
            ApiError::UsernameExists => 40901,
            ApiError::EmailExists => 40902,
            ApiError::Internal => 50000,
            ApiError::Database(_) => 50001,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(ref e) = self {
            error!(error = %e, "database error");
        }
        let body = ApiResponse::<()> {
            code: self.code(),
            message: self.to_string(),
            data: None,
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Maps a storage-level unique violation to the matching conflict error.
/// The service pre-checks race with concurrent inserts; the partial unique
/// indexes on active rows are the final authority.
pub fn conflict_from_unique_violation(err: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some("23505") {
            match db.constraint() {
                Some(c) if c.contains("email") => return ApiError::EmailExists,
                Some(c) if c.contains("username") => return ApiError::UsernameExists,
                _ => {}
            }
        }
    }
    ApiError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn status_mapping_is_stable() {
        assert_eq!(ApiError::InvalidParam("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::ArticleNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::UsernameExists.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::EmailExists.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn code_mapping_is_stable() {
        assert_eq!(ApiError::InvalidParam("x".into()).code(), 40001);
        assert_eq!(ApiError::InvalidCredentials.code(), 40002);
        assert_eq!(ApiError::Unauthorized.code(), 40100);
        assert_eq!(ApiError::TokenExpired.code(), 40101);
        assert_eq!(ApiError::Forbidden.code(), 40300);
        assert_eq!(ApiError::UserNotFound.code(), 40401);
        assert_eq!(ApiError::ArticleNotFound.code(), 40402);
        assert_eq!(ApiError::UsernameExists.code(), 40901);
        assert_eq!(ApiError::EmailExists.code(), 40902);
        assert_eq!(ApiError::Internal.code(), 50000);
    }

    #[test]
    fn response_uses_mapped_status() {
        let resp = ApiError::Forbidden.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let resp = ApiError::UsernameExists.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[derive(Debug)]
    struct FakeDbError {
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl std::fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for FakeDbError {}

    impl sqlx::error::DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.code {
                "23505" => sqlx::error::ErrorKind::UniqueViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }
    }

    fn db_error(code: &'static str, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { code, constraint }))
    }

    #[test]
    fn unique_violation_on_email_maps_to_email_exists() {
        let err = conflict_from_unique_violation(db_error("23505", Some("users_email_active_key")));
        assert!(matches!(err, ApiError::EmailExists));
    }

    #[test]
    fn unique_violation_on_username_maps_to_username_exists() {
        let err =
            conflict_from_unique_violation(db_error("23505", Some("users_username_active_key")));
        assert!(matches!(err, ApiError::UsernameExists));
    }

    #[test]
    fn other_database_errors_stay_internal() {
        let err = conflict_from_unique_violation(db_error("23503", Some("articles_user_id_fkey")));
        assert!(matches!(err, ApiError::Database(_)));
        assert_eq!(err.code(), 50001);
    }
}
