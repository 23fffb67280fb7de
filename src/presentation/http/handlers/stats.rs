use axum::{Json, extract::State};
use serde::Serialize;

use crate::presentation::http::{errors::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub total_articles: i64,
    pub total_users: i64,
    pub total_comments: i64,
    pub total_likes: i64,
    pub total_bookmarks: i64,
}

pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, AppError> {
    let total_articles = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles")
        .fetch_one(&state.db)
        .await
        .map_err(AppError::from)?;

    let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db)
        .await
        .map_err(AppError::from)?;

    let total_comments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
        .fetch_one(&state.db)
        .await
        .map_err(AppError::from)?;

    let total_likes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes")
        .fetch_one(&state.db)
        .await
        .map_err(AppError::from)?;

    let total_bookmarks = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookmarks")
        .fetch_one(&state.db)
        .await
        .map_err(AppError::from)?;

    Ok(Json(StatisticsResponse {
        total_articles,
        total_users,
        total_comments,
        total_likes,
        total_bookmarks,
    }))
}
