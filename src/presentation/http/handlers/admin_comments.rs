use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::{
    domain::comment::repository::CommentRepository,
    presentation::http::{
        errors::AppError, middleware::auth::CurrentUser, state::AppState,
    },
};

pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let comments = state.comment_repo.list_all().await?;
    Ok(Json(serde_json::to_value(comments).unwrap_or_default()))
}

pub async fn list_pending_comments(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let comments = state.comment_repo.list_pending().await?;
    Ok(Json(serde_json::to_value(comments).unwrap_or_default()))
}

/// Idempotent: re-approving an already-approved comment succeeds quietly.
pub async fn approve_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let comment = state.comment_repo.approve(id).await?;

    tracing::info!(comment_id = comment.id, moderator_id = current.0.id, "comment approved");
    Ok(Json(json!({ "message": "Komentar berhasil disetujui" })))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.comment_repo.delete(id).await?;

    tracing::info!(comment_id = id, moderator_id = current.0.id, "comment deleted");
    Ok(Json(json!({ "message": "Komentar berhasil dihapus" })))
}
