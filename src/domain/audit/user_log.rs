use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One row of the append-only privileged-action audit trail.
///
/// Rows are never updated or deleted. The only action currently produced is
/// `change_role`, written in the same transaction as the role mutation it
/// records; `detail` is a human-readable description such as
/// `"from USER to ADMIN"`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct UserLog {
    pub id: i64,
    pub actor_id: i64,
    pub target_user_id: i64,
    pub action: String,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub const ACTION_CHANGE_ROLE: &str = "change_role";
