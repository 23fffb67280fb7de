use axum::{Extension, Json, extract::State};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    domain::user::{
        entity::{NewUser, Role, User},
        repository::UserRepository,
    },
    infrastructure::security::password::{hash_password, verify_password},
    presentation::http::{
        errors::AppError,
        middleware::auth::{Claims, CurrentUser},
        state::AppState,
    },
};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "Username minimal 3 karakter"))]
    pub username: String,
    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password minimal 6 karakter"))]
    pub password: String,
    #[validate(length(min = 1, message = "Nama lengkap diperlukan"))]
    pub full_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password diperlukan"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub password: Option<String>,
}

/// One representative message out of a failed `validator` run; the client
/// shows a single error at a time.
pub fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Input tidak valid".to_string())
}

pub fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    let exp = (chrono::Utc::now() + chrono::Duration::days(7)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        exp,
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Reset tokens are `base64(user_id:issued_millis)` — the original portal's
/// demo flow, kept until a real mail pipeline exists.
fn encode_reset_token(user_id: i64) -> String {
    BASE64.encode(format!("{}:{}", user_id, chrono::Utc::now().timestamp_millis()))
}

fn decode_reset_token(token: &str) -> Option<i64> {
    let decoded = BASE64.decode(token).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    decoded.split(':').next()?.parse().ok()
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

    let email = body.email.trim().to_lowercase();
    let username = body.username.trim().to_string();

    let email_taken = state.user_repo.find_by_email(&email).await?.is_some();
    let username_taken = state.user_repo.find_by_username(&username).await?.is_some();
    if email_taken || username_taken {
        return Err(AppError::BadRequest(
            "Email atau username sudah digunakan".to_string(),
        ));
    }

    let password_hash = hash_password(&body.password)?;
    let user = state
        .user_repo
        .insert(NewUser {
            username,
            email,
            password_hash,
            full_name: body.full_name.trim().to_string(),
            role: Role::User,
            avatar: None,
        })
        .await?;

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = user.id, "user registered");

    Ok(Json(AuthResponse {
        message: "Registrasi berhasil".to_string(),
        token,
        user,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

    let email = body.email.trim().to_lowercase();

    // Unknown email, deactivated account, and wrong password are deliberately
    // indistinguishable to the caller.
    let user = state
        .user_repo
        .find_by_email(&email)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::Unauthorized("Email atau password salah".to_string()))?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Email atau password salah".to_string()));
    }

    let token = issue_token(&state, &user)?;

    Ok(Json(AuthResponse {
        message: "Login berhasil".to_string(),
        token,
        user,
    }))
}

pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<User> {
    Json(current.0)
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Email diperlukan".to_string()))?;

    let user = state
        .user_repo
        .find_by_email(&email.to_lowercase())
        .await?
        .ok_or_else(|| AppError::NotFound("Email tidak ditemukan".to_string()))?;

    let token = encode_reset_token(user.id);
    let reset_url = format!("{}/reset-password?token={}", state.config.frontend_url, token);

    // TODO: send real mail once an SMTP provider is wired in; until then the
    // link is returned directly, as the original demo flow did.
    Ok(Json(serde_json::json!({
        "message": "Link reset password telah dikirim ke email (dummy)",
        "reset_url": reset_url,
    })))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (Some(token), Some(password)) = (
        body.token.as_deref().filter(|s| !s.is_empty()),
        body.password.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Token dan password baru diperlukan".to_string(),
        ));
    };

    let user_id = decode_reset_token(token)
        .ok_or_else(|| AppError::BadRequest("Token tidak valid".to_string()))?;

    let user = state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User tidak ditemukan".to_string()))?;

    let password_hash = hash_password(password)?;
    state.user_repo.update_password(user.id, &password_hash).await?;

    Ok(Json(serde_json::json!({
        "message": "Password berhasil direset, silakan login dengan password baru."
    })))
}

#[cfg(test)]
mod tests {
    use super::{decode_reset_token, encode_reset_token, first_validation_message};
    use validator::Validate;

    #[test]
    fn reset_token_round_trips() {
        let token = encode_reset_token(42);
        assert_eq!(decode_reset_token(&token), Some(42));
    }

    #[test]
    fn garbage_reset_tokens_are_rejected() {
        assert_eq!(decode_reset_token("not-base64!!"), None);
        use base64::Engine as _;
        let no_id = base64::engine::general_purpose::STANDARD.encode("abc:def");
        assert_eq!(decode_reset_token(&no_id), None);
    }

    #[test]
    fn register_validation_surfaces_the_field_message() {
        let body = super::RegisterRequest {
            username: "budi".to_string(),
            email: "not-an-email".to_string(),
            password: "rahasia123".to_string(),
            full_name: "Budi Santoso".to_string(),
        };
        let errors = body.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Format email tidak valid");
    }
}
