use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use crate::{
    application::change_role::dto::ChangeRoleRequest,
    domain::{
        audit::{repository::AuditLogRepository, user_log::UserLog},
        shared::pagination::PaginationRequest,
        user::{entity::User, repository::UserRepository},
    },
    presentation::http::{
        errors::AppError, middleware::auth::CurrentUser, state::AppState,
    },
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.user_repo.list_all().await?;
    Ok(Json(users))
}

/// The role assurance workflow: the acting developer re-enters their own
/// password, the target's role is updated, and one audit row is written —
/// all or nothing.
pub async fn change_user_role(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<ChangeRoleRequest>,
) -> Result<Json<User>, AppError> {
    let updated = state.change_role.execute(current.0.id, id, body).await?;
    Ok(Json(updated))
}

pub async fn list_user_logs(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<Vec<UserLog>>, AppError> {
    let (limit, offset) = pagination.normalized();
    let logs = state.audit_repo.list(limit, offset).await?;
    Ok(Json(logs))
}
