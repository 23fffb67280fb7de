use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A reader comment on an article.
///
/// `is_approved` is decided once at creation by the auto-moderation policy and
/// afterwards changes only through a staff approve action. The public article
/// view shows a comment only when `is_approved` is true. Authors cannot edit
/// their comments after creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
    pub article_id: i64,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with a sanitized author summary, as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
    pub article_id: i64,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_username: String,
    pub author_full_name: String,
    pub author_avatar: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub author_id: i64,
    pub article_id: i64,
    pub is_approved: bool,
}
