use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

use crate::{
    domain::article::entity::Category,
    presentation::http::{
        errors::AppError, handlers::auth::first_validation_message, state::AppState,
    },
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "Nama kategori diperlukan"))]
    pub name: String,
    #[validate(length(min = 1, message = "Slug kategori diperlukan"))]
    pub slug: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, slug, description, color, created_at FROM categories ORDER BY name",
    )
    .fetch_all(&state.db)
    .await
    .map_err(AppError::from)?;

    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

    let result = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, slug, description, color) \
         VALUES ($1, $2, $3, COALESCE($4, '#DC2626')) \
         RETURNING id, name, slug, description, color, created_at",
    )
    .bind(&body.name)
    .bind(&body.slug)
    .bind(&body.description)
    .bind(&body.color)
    .fetch_one(&state.db)
    .await;

    match result {
        Ok(category) => Ok((StatusCode::CREATED, Json(category))),
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
            Err(AppError::BadRequest(
                "Nama atau slug kategori sudah digunakan".to_string(),
            ))
        }
        Err(e) => Err(AppError::from(e)),
    }
}
