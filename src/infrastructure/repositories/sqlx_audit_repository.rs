use crate::domain::{
    audit::{repository::AuditLogRepository, user_log::UserLog},
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct SqlxAuditLogRepository {
    pub pool: PgPool,
}

impl SqlxAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for SqlxAuditLogRepository {
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<UserLog>, DomainError> {
        sqlx::query_as::<_, UserLog>(
            "SELECT id, actor_id, target_user_id, action, detail, created_at \
             FROM user_logs \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2",
        )
        .bind(limit.clamp(1, 200))
        .bind(offset.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }
}
