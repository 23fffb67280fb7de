use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use validator::Validate;

use crate::{
    domain::article::entity::{Article, ArticleWithMeta},
    presentation::http::{
        errors::AppError,
        handlers::auth::first_validation_message,
        middleware::auth::CurrentUser,
        state::AppState,
    },
};

const ARTICLE_META_SELECT: &str =
    "SELECT a.id, a.title, a.slug, a.excerpt, a.content, a.cover_image, \
            a.author_id, a.category_id, a.is_published, a.published_at, \
            a.created_at, a.updated_at, \
            u.username AS author_username, u.full_name AS author_full_name, \
            c.name AS category_name, c.slug AS category_slug, c.color AS category_color, \
            (SELECT COUNT(*) FROM likes l WHERE l.article_id = a.id) AS likes_count, \
            (SELECT COUNT(*) FROM comments cm \
             WHERE cm.article_id = a.id AND cm.is_approved = TRUE) AS comments_count, \
            (SELECT COUNT(*) FROM bookmarks bm WHERE bm.article_id = a.id) AS bookmarks_count \
     FROM articles a \
     JOIN users u ON u.id = a.author_id \
     JOIN categories c ON c.id = a.category_id \
     WHERE 1=1";

#[derive(Debug, Deserialize)]
pub struct ArticlesQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub category: Option<String>,
    pub search: Option<String>,
    /// `published=false` lifts the published filter for admin screens;
    /// everything else keeps the public published-only view.
    pub published: Option<String>,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleWithMeta>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, message = "Judul diperlukan"))]
    pub title: String,
    #[validate(length(min = 1, message = "Slug diperlukan"))]
    pub slug: String,
    #[validate(length(min = 1, message = "Ringkasan diperlukan"))]
    pub excerpt: String,
    #[validate(length(min = 1, message = "Konten diperlukan"))]
    pub content: String,
    pub category_id: i64,
    #[serde(default)]
    pub is_published: bool,
    pub cover_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i64>,
    pub is_published: Option<bool>,
    pub cover_image: Option<String>,
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ArticlesQuery>,
) -> Result<Json<ArticlesResponse>, AppError> {
    let limit = params.limit.clamp(1, 100);
    let page = params.page.max(1);
    let offset = (page - 1) * limit;

    let published_only = params.published.as_deref() != Some("false");
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut data_qb = QueryBuilder::<Postgres>::new(ARTICLE_META_SELECT);
    if published_only {
        data_qb.push(" AND a.is_published = TRUE");
    }
    if let Some(category) = category {
        data_qb.push(" AND c.slug = ").push_bind(category);
    }
    if let Some(search) = search {
        let like = format!("%{}%", search);
        data_qb.push(" AND (a.title ILIKE ");
        data_qb.push_bind(like.clone());
        data_qb.push(" OR a.content ILIKE ");
        data_qb.push_bind(like.clone());
        data_qb.push(" OR a.excerpt ILIKE ");
        data_qb.push_bind(like);
        data_qb.push(")");
    }
    data_qb
        .push(" ORDER BY a.created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let articles: Vec<ArticleWithMeta> = data_qb
        .build_query_as()
        .fetch_all(&state.db)
        .await
        .map_err(AppError::from)?;

    let mut count_qb = QueryBuilder::<Postgres>::new(
        "SELECT COUNT(*)::bigint FROM articles a \
         JOIN categories c ON c.id = a.category_id \
         WHERE 1=1",
    );
    if published_only {
        count_qb.push(" AND a.is_published = TRUE");
    }
    if let Some(category) = category {
        count_qb.push(" AND c.slug = ").push_bind(category);
    }
    if let Some(search) = search {
        let like = format!("%{}%", search);
        count_qb.push(" AND (a.title ILIKE ");
        count_qb.push_bind(like.clone());
        count_qb.push(" OR a.content ILIKE ");
        count_qb.push_bind(like.clone());
        count_qb.push(" OR a.excerpt ILIKE ");
        count_qb.push_bind(like);
        count_qb.push(")");
    }

    let total: i64 = count_qb
        .build_query_scalar()
        .fetch_one(&state.db)
        .await
        .map_err(AppError::from)?;

    Ok(Json(ArticlesResponse {
        articles,
        total,
        page,
        limit,
    }))
}

pub async fn get_article_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleWithMeta>, AppError> {
    let mut qb = QueryBuilder::<Postgres>::new(ARTICLE_META_SELECT);
    qb.push(" AND a.slug = ").push_bind(slug);

    let article: Option<ArticleWithMeta> = qb
        .build_query_as()
        .fetch_optional(&state.db)
        .await
        .map_err(AppError::from)?;

    article
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Artikel tidak ditemukan".to_string()))
}

pub async fn create_article(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<CreateArticleRequest>,
) -> Result<Json<Article>, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

    let result = sqlx::query_as::<_, Article>(
        "INSERT INTO articles \
         (title, slug, excerpt, content, cover_image, author_id, category_id, is_published, published_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, CASE WHEN $8 THEN NOW() ELSE NULL END) \
         RETURNING id, title, slug, excerpt, content, cover_image, author_id, category_id, \
         is_published, published_at, created_at, updated_at",
    )
    .bind(&body.title)
    .bind(&body.slug)
    .bind(&body.excerpt)
    .bind(&body.content)
    .bind(&body.cover_image)
    .bind(current.0.id)
    .bind(body.category_id)
    .bind(body.is_published)
    .fetch_one(&state.db)
    .await;

    match result {
        Ok(article) => {
            tracing::info!(article_id = article.id, author_id = current.0.id, "article created");
            Ok(Json(article))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
            Err(AppError::BadRequest("Slug sudah digunakan".to_string()))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23503") => {
            Err(AppError::BadRequest("Kategori tidak ditemukan".to_string()))
        }
        Err(e) => Err(AppError::from(e)),
    }
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateArticleRequest>,
) -> Result<Json<Article>, AppError> {
    let article = sqlx::query_as::<_, Article>(
        "UPDATE articles SET \
             title = COALESCE($2, title), \
             slug = COALESCE($3, slug), \
             excerpt = COALESCE($4, excerpt), \
             content = COALESCE($5, content), \
             cover_image = COALESCE($6, cover_image), \
             category_id = COALESCE($7, category_id), \
             is_published = COALESCE($8, is_published), \
             published_at = CASE \
                 WHEN $8 = TRUE AND published_at IS NULL THEN NOW() \
                 ELSE published_at \
             END, \
             updated_at = NOW() \
         WHERE id = $1 \
         RETURNING id, title, slug, excerpt, content, cover_image, author_id, category_id, \
         is_published, published_at, created_at, updated_at",
    )
    .bind(id)
    .bind(&body.title)
    .bind(&body.slug)
    .bind(&body.excerpt)
    .bind(&body.content)
    .bind(&body.cover_image)
    .bind(body.category_id)
    .bind(body.is_published)
    .fetch_optional(&state.db)
    .await
    .map_err(AppError::from)?
    .ok_or_else(|| AppError::NotFound("Artikel tidak ditemukan".to_string()))?;

    Ok(Json(article))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(AppError::from)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Artikel tidak ditemukan".to_string()));
    }

    tracing::info!(article_id = id, "article deleted");
    Ok(Json(serde_json::json!({ "message": "Artikel berhasil dihapus" })))
}
