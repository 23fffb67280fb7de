use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde_json::json;

use crate::{
    domain::{
        article::entity::ArticleWithMeta,
        shared::pagination::{PaginatedResponse, PaginationRequest},
        social::repository::SocialRepository,
    },
    presentation::http::{
        errors::AppError,
        middleware::auth::{CurrentUser, authenticate},
        state::AppState,
    },
};

async fn ensure_article_exists(state: &AppState, article_id: i64) -> Result<(), AppError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM articles WHERE id = $1)")
            .bind(article_id)
            .fetch_one(&state.db)
            .await
            .map_err(AppError::from)?;
    if !exists {
        return Err(AppError::NotFound("Artikel tidak ditemukan".to_string()));
    }
    Ok(())
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let current = authenticate(&state, &headers).await?;
    ensure_article_exists(&state, article_id).await?;

    let is_liked = state.social_repo.toggle_like(current.id, article_id).await?;
    Ok(Json(json!({
        "is_liked": is_liked,
        "message": if is_liked { "Artikel disukai" } else { "Like dibatalkan" },
    })))
}

pub async fn toggle_bookmark(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let current = authenticate(&state, &headers).await?;
    ensure_article_exists(&state, article_id).await?;

    let is_bookmarked = state
        .social_repo
        .toggle_bookmark(current.id, article_id)
        .await?;
    Ok(Json(json!({
        "is_bookmarked": is_bookmarked,
        "message": if is_bookmarked { "Artikel dibookmark" } else { "Bookmark dibatalkan" },
    })))
}

pub async fn list_my_bookmarks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<PaginatedResponse<ArticleWithMeta>>, AppError> {
    let (limit, offset) = pagination.normalized();
    let (items, total) = state
        .social_repo
        .list_bookmarks(current.0.id, limit, offset)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: pagination.page.max(1),
        limit,
    }))
}
