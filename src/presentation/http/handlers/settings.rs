use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    domain::settings::entity::SiteSetting,
    presentation::http::{errors::AppError, state::AppState},
};

#[derive(Debug, Deserialize)]
pub struct UpsertSettingRequest {
    pub key: String,
    pub value: serde_json::Value,
    pub description: Option<String>,
}

/// Public read of a single setting, so the client can resolve things like the
/// site title without authentication.
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SiteSetting>, AppError> {
    sqlx::query_as::<_, SiteSetting>(
        "SELECT id, key, value, description, updated_at FROM site_settings WHERE key = $1",
    )
    .bind(&key)
    .fetch_optional(&state.db)
    .await
    .map_err(AppError::from)?
    .map(Json)
    .ok_or_else(|| AppError::NotFound("Pengaturan tidak ditemukan".to_string()))
}

pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<Vec<SiteSetting>>, AppError> {
    let settings = sqlx::query_as::<_, SiteSetting>(
        "SELECT id, key, value, description, updated_at FROM site_settings ORDER BY key",
    )
    .fetch_all(&state.db)
    .await
    .map_err(AppError::from)?;

    Ok(Json(settings))
}

pub async fn upsert_setting(
    State(state): State<AppState>,
    Json(body): Json<UpsertSettingRequest>,
) -> Result<Json<SiteSetting>, AppError> {
    let key = body.key.trim();
    if key.is_empty() {
        return Err(AppError::ValidationError("Key diperlukan".to_string()));
    }

    let setting = sqlx::query_as::<_, SiteSetting>(
        "INSERT INTO site_settings (key, value, description, updated_at) \
         VALUES ($1, $2, $3, NOW()) \
         ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW() \
         RETURNING id, key, value, description, updated_at",
    )
    .bind(key)
    .bind(&body.value)
    .bind(&body.description)
    .fetch_one(&state.db)
    .await
    .map_err(AppError::from)?;

    Ok(Json(setting))
}

pub async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM site_settings WHERE key = $1")
        .bind(&key)
        .execute(&state.db)
        .await
        .map_err(AppError::from)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Pengaturan tidak ditemukan".to_string()));
    }

    Ok(Json(json!({ "message": "Pengaturan berhasil dihapus" })))
}
