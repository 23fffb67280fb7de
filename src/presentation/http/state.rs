use crate::{
    application::change_role::use_case::ChangeRoleUseCase,
    config::Config,
    infrastructure::{
        repositories::{
            sqlx_audit_repository::SqlxAuditLogRepository,
            sqlx_comment_repository::SqlxCommentRepository,
            sqlx_social_repository::SqlxSocialRepository,
            sqlx_user_repository::SqlxUserRepository,
        },
        security::comment_moderator::CommentModerator,
    },
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub redis: redis::Client,
    pub config: Config,
    pub user_repo: Arc<SqlxUserRepository>,
    pub comment_repo: Arc<SqlxCommentRepository>,
    pub social_repo: Arc<SqlxSocialRepository>,
    pub audit_repo: Arc<SqlxAuditLogRepository>,
    pub moderator: Arc<CommentModerator>,
    pub change_role: Arc<ChangeRoleUseCase>,
    pub started_at: Instant,
}
