use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    articles::{
        dto::{ArticleResponse, CreateArticleRequest, UpdateArticleRequest},
        services,
    },
    auth::extractors::AuthUser,
    error::ApiError,
    pagination::{PageQuery, PageResponse},
    response::ApiResponse,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/:id",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/users/:id/articles", get(list_user_articles))
}

#[instrument(skip(state))]
async fn list_articles(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<ApiResponse<PageResponse<ArticleResponse>>>, ApiError> {
    let result = services::list(&state.db, q.normalize()).await?;
    Ok(ApiResponse::ok(result))
}

#[instrument(skip(state))]
async fn list_user_articles(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(q): Query<PageQuery>,
) -> Result<Json<ApiResponse<PageResponse<ArticleResponse>>>, ApiError> {
    let result = services::list_by_user(&state.db, user_id, q.normalize()).await?;
    Ok(ApiResponse::ok(result))
}

#[instrument(skip(state))]
async fn get_article(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    let article = services::get(&state.db, id).await?;
    Ok(ApiResponse::ok(article))
}

#[instrument(skip(state, payload))]
async fn create_article(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    let article = services::create(&state.db, user.id, payload).await?;
    Ok(ApiResponse::ok(article))
}

#[instrument(skip(state, payload))]
async fn update_article(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateArticleRequest>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    let article = services::update(&state.db, id, user.id, payload).await?;
    Ok(ApiResponse::ok(article))
}

#[instrument(skip(state))]
async fn delete_article(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    services::delete(&state.db, id, user.id).await?;
    Ok(ApiResponse::empty())
}
