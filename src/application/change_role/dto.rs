use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /api/v1/dev/users/{id}/role`.
///
/// Both fields are required; they stay optional here so the workflow can
/// answer missing input with its own validation message instead of a generic
/// deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeRoleRequest {
    pub role: Option<String>,
    pub password: Option<String>,
}
