use crate::domain::{
    article::entity::ArticleWithMeta, shared::errors::DomainError,
    social::repository::SocialRepository,
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct SqlxSocialRepository {
    pub pool: PgPool,
}

impl SqlxSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn toggle(
        &self,
        table: ToggleTable,
        user_id: i64,
        article_id: i64,
    ) -> Result<bool, DomainError> {
        let (exists_sql, delete_sql, insert_sql) = match table {
            ToggleTable::Likes => (
                "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND article_id = $2)",
                "DELETE FROM likes WHERE user_id = $1 AND article_id = $2",
                "INSERT INTO likes (user_id, article_id) VALUES ($1, $2)",
            ),
            ToggleTable::Bookmarks => (
                "SELECT EXISTS(SELECT 1 FROM bookmarks WHERE user_id = $1 AND article_id = $2)",
                "DELETE FROM bookmarks WHERE user_id = $1 AND article_id = $2",
                "INSERT INTO bookmarks (user_id, article_id) VALUES ($1, $2)",
            ),
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        let exists = sqlx::query_scalar::<_, bool>(exists_sql)
            .bind(user_id)
            .bind(article_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        if exists {
            sqlx::query(delete_sql)
                .bind(user_id)
                .bind(article_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        } else {
            sqlx::query(insert_sql)
                .bind(user_id)
                .bind(article_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        Ok(!exists)
    }
}

#[derive(Clone, Copy)]
enum ToggleTable {
    Likes,
    Bookmarks,
}

#[async_trait]
impl SocialRepository for SqlxSocialRepository {
    async fn toggle_like(&self, user_id: i64, article_id: i64) -> Result<bool, DomainError> {
        self.toggle(ToggleTable::Likes, user_id, article_id).await
    }

    async fn toggle_bookmark(&self, user_id: i64, article_id: i64) -> Result<bool, DomainError> {
        self.toggle(ToggleTable::Bookmarks, user_id, article_id).await
    }

    async fn list_bookmarks(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ArticleWithMeta>, i64), DomainError> {
        let items = sqlx::query_as::<_, ArticleWithMeta>(
            "SELECT a.id, a.title, a.slug, a.excerpt, a.content, a.cover_image, \
                    a.author_id, a.category_id, a.is_published, a.published_at, \
                    a.created_at, a.updated_at, \
                    u.username AS author_username, u.full_name AS author_full_name, \
                    c.name AS category_name, c.slug AS category_slug, c.color AS category_color, \
                    (SELECT COUNT(*) FROM likes l WHERE l.article_id = a.id) AS likes_count, \
                    (SELECT COUNT(*) FROM comments cm \
                     WHERE cm.article_id = a.id AND cm.is_approved = TRUE) AS comments_count, \
                    (SELECT COUNT(*) FROM bookmarks bm WHERE bm.article_id = a.id) AS bookmarks_count \
             FROM bookmarks b \
             JOIN articles a ON a.id = b.article_id \
             JOIN users u ON u.id = a.author_id \
             JOIN categories c ON c.id = a.category_id \
             WHERE b.user_id = $1 \
             ORDER BY b.created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookmarks WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        Ok((items, total))
    }
}
