use super::user_log::UserLog;
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;

/// Read side of the audit trail. The write happens inside the role-change
/// transaction owned by the user repository, keeping mutate+audit atomic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// All audit rows, most recent first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<UserLog>, DomainError>;
}
