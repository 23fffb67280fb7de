use axum::{
    extract::State,
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{
    domain::user::{entity::User, repository::UserRepository},
    presentation::http::{errors::AppError, state::AppState},
};

/// JWT payload issued at login/registration. Authorization decisions never
/// trust `role` from the token: the middleware reloads the user row on every
/// request, so deactivation and role changes take effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

/// The authenticated user, inserted into request extensions by the auth
/// middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

/// Resolve the bearer token to a live user row. Used by the route-layer
/// guards below and inline by handlers whose path is otherwise public.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let token = extract_bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("Token akses diperlukan".to_string()))?;

    let claims = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token tidak valid".to_string()))?
    .claims;

    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Token tidak valid".to_string()))?;

    state
        .user_repo
        .find_by_id(user_id)
        .await
        .map_err(AppError::from)?
        .filter(|user| user.is_active)
        .ok_or_else(|| {
            AppError::Unauthorized("Token tidak valid atau pengguna tidak aktif".to_string())
        })
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, req.headers()).await?;
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, req.headers()).await?;
    if !user.role.is_admin_level() {
        return Err(AppError::Forbidden(
            "Akses ditolak - peran tidak memadai".to_string(),
        ));
    }
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

pub async fn require_developer(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, req.headers()).await?;
    if !user.role.is_developer_level() {
        return Err(AppError::Forbidden(
            "Akses ditolak - peran tidak memadai".to_string(),
        ));
    }
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}
