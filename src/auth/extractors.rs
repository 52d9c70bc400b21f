use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;

use super::jwt::JwtKeys;

/// Authenticated identity extracted from the `Authorization: Bearer` header.
/// A handler taking this parameter never runs for an unauthenticated request;
/// any failed step rejects before the handler body.
#[derive(Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            ApiError::from(e)
        })?;

        Ok(AuthUser {
            id: claims.sub,
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use axum::http::Request;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            issuer: "test-issuer".into(),
            ttl_minutes: 5,
        })
    }

    fn parts_with_auth(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/me");
        if let Some(h) = header {
            builder = builder.header(axum::http::header::AUTHORIZATION, h);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let keys = make_keys("test-secret");
        let mut parts = parts_with_auth(None);
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let keys = make_keys("test-secret");
        let mut parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let keys = make_keys("test-secret");
        let other = make_keys("other-secret");
        let token = other.sign(Uuid::new_v4(), "mallory").expect("sign");
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn valid_token_yields_identity() {
        let keys = make_keys("test-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, "alice").expect("sign");
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let user = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .expect("extract");
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "alice");
    }
}
