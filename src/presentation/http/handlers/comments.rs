use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;

use crate::{
    domain::comment::{entity::NewComment, repository::CommentRepository},
    presentation::http::{
        errors::AppError, middleware::auth::authenticate, state::AppState,
    },
};

const MAX_COMMENT_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

pub async fn get_article_comments(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let comments = state
        .comment_repo
        .list_approved_by_article(article_id)
        .await?;
    Ok(Json(serde_json::to_value(comments).unwrap_or_default()))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let current = authenticate(&state, &headers).await?;

    let content = body.content.trim();
    if content.is_empty() {
        return Err(AppError::ValidationError(
            "Komentar tidak boleh kosong".to_string(),
        ));
    }
    if content.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::ValidationError(
            "Komentar maksimal 1000 karakter".to_string(),
        ));
    }

    let article_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM articles WHERE id = $1)")
            .bind(article_id)
            .fetch_one(&state.db)
            .await
            .map_err(AppError::from)?;
    if !article_exists {
        return Err(AppError::NotFound("Artikel tidak ditemukan".to_string()));
    }

    // Cooldown per user per article; a Redis outage degrades to no cooldown
    // rather than blocking comment submission.
    if state.config.comment_cooldown_seconds > 0 {
        if let Ok(mut conn) = state.redis.get_multiplexed_async_connection().await {
            let key = format!("comment_rate:{}:{}", article_id, current.id);
            let exists: bool = redis::cmd("EXISTS")
                .arg(&key)
                .query_async(&mut conn)
                .await
                .unwrap_or(false);
            if exists {
                return Err(AppError::BadRequest(
                    "Tunggu sebentar sebelum berkomentar lagi".to_string(),
                ));
            }
            let _: Result<(), _> = redis::cmd("SET")
                .arg(&key)
                .arg("1")
                .arg("EX")
                .arg(state.config.comment_cooldown_seconds)
                .query_async(&mut conn)
                .await;
        }
    }

    let outcome = state.moderator.assess(content);
    if !outcome.approved {
        tracing::info!(
            author_id = current.id,
            article_id,
            flags = ?outcome.flags,
            "comment held for moderation"
        );
    }

    let comment = state
        .comment_repo
        .insert(NewComment {
            content: content.to_string(),
            author_id: current.id,
            article_id,
            is_approved: outcome.approved,
        })
        .await?;

    let message = if comment.is_approved {
        "Komentar berhasil dikirim"
    } else {
        "Komentar berhasil dikirim dan menunggu moderasi"
    };

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": message,
            "comment": comment,
        })),
    ))
}
