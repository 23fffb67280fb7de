use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use serde_json::json;

use crate::{
    domain::user::{
        entity::{ProfileUpdate, User},
        repository::UserRepository,
    },
    infrastructure::security::password::{hash_password, verify_password},
    presentation::http::{
        errors::AppError, middleware::auth::CurrentUser, state::AppState,
    },
};

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn get_profile(Extension(current): Extension<CurrentUser>) -> Json<User> {
    Json(current.0)
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let full_name = body
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let (Some(full_name), Some(email)) = (full_name, email) else {
        return Err(AppError::ValidationError(
            "Nama dan email diperlukan".to_string(),
        ));
    };

    // A password change re-proves the current password first, same as the
    // role-change re-authentication.
    let password_hash = match body.new_password.as_deref().filter(|s| !s.is_empty()) {
        Some(new_password) => {
            let current_password = body
                .current_password
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    AppError::ValidationError(
                        "Password lama diperlukan untuk mengubah password".to_string(),
                    )
                })?;

            if !verify_password(current_password, &current.0.password_hash)? {
                return Err(AppError::Unauthorized("Password lama tidak benar".to_string()));
            }
            Some(hash_password(new_password)?)
        }
        None => None,
    };

    state
        .user_repo
        .update_profile(
            current.0.id,
            ProfileUpdate {
                full_name: full_name.to_string(),
                email: email.to_lowercase(),
                password_hash,
            },
        )
        .await?;

    Ok(Json(json!({ "message": "Profil berhasil diperbarui" })))
}
