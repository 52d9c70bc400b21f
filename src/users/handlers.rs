use axum::{
    extract::{FromRef, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{extractors::AuthUser, jwt::JwtKeys},
    error::ApiError,
    pagination::{PageQuery, PageResponse},
    response::ApiResponse,
    state::AppState,
    users::{
        dto::{
            ListUsersQuery, LoginRequest, LoginResponse, PublicUser, RegisterRequest,
            UpdateUserRequest,
        },
        services,
    },
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me).put(update_me).delete(delete_me))
        .route("/users", get(list_users))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    services::register(&state.db, payload).await?;
    Ok(ApiResponse::empty())
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let resp = services::login(&state.db, &keys, payload).await?;
    Ok(ApiResponse::ok(resp))
}

#[instrument(skip(state))]
async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<PublicUser>>, ApiError> {
    let profile = services::get(&state.db, user.id).await?;
    Ok(ApiResponse::ok(profile))
}

#[instrument(skip(state))]
async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(q): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<PageResponse<PublicUser>>>, ApiError> {
    let page = PageQuery {
        page: q.page,
        page_size: q.page_size,
    }
    .normalize();
    let result = services::list(&state.db, page, q.keyword.as_deref()).await?;
    Ok(ApiResponse::ok(result))
}

#[instrument(skip(state, payload))]
async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<PublicUser>>, ApiError> {
    let profile = services::update(&state.db, user.id, payload).await?;
    Ok(ApiResponse::ok(profile))
}

#[instrument(skip(state))]
async fn delete_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    services::delete(&state.db, user.id).await?;
    Ok(ApiResponse::empty())
}
