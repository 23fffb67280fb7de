use axum::{Json, extract::State};
use serde_json::json;

use crate::{
    domain::comment::entity::CommentWithAuthor,
    presentation::http::{errors::AppError, state::AppState},
};

/// Developer diagnostics: uptime, build version, table totals, and the latest
/// comments. Connection strings and secrets are deliberately absent.
pub async fn system_info(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let totals: (i64, i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM articles), \
                (SELECT COUNT(*) FROM users), \
                (SELECT COUNT(*) FROM comments)",
    )
    .fetch_one(&state.db)
    .await
    .map_err(AppError::from)?;

    let recent_comments = sqlx::query_as::<_, CommentWithAuthor>(
        "SELECT c.id, c.content, c.author_id, c.article_id, c.is_approved, \
                c.created_at, c.updated_at, \
                u.username AS author_username, u.full_name AS author_full_name, \
                u.avatar AS author_avatar \
         FROM comments c \
         JOIN users u ON u.id = c.author_id \
         ORDER BY c.created_at DESC \
         LIMIT 5",
    )
    .fetch_all(&state.db)
    .await
    .map_err(AppError::from)?;

    Ok(Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs(),
        "statistics": {
            "total_articles": totals.0,
            "total_users": totals.1,
            "total_comments": totals.2,
        },
        "recent_comments": recent_comments,
    })))
}
