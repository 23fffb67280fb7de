use crate::domain::{
    comment::{
        entity::{Comment, CommentWithAuthor, NewComment},
        repository::CommentRepository,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn insert(&self, comment: NewComment) -> Result<Comment, DomainError> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (content, author_id, article_id, is_approved) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, content, author_id, article_id, is_approved, created_at, updated_at",
        )
        .bind(&comment.content)
        .bind(comment.author_id)
        .bind(comment.article_id)
        .bind(comment.is_approved)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn list_approved_by_article(
        &self,
        article_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, DomainError> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.content, c.author_id, c.article_id, c.is_approved, \
                    c.created_at, c.updated_at, \
                    u.username AS author_username, u.full_name AS author_full_name, \
                    u.avatar AS author_avatar \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.article_id = $1 AND c.is_approved = TRUE \
             ORDER BY c.created_at DESC",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<CommentWithAuthor>, DomainError> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.content, c.author_id, c.article_id, c.is_approved, \
                    c.created_at, c.updated_at, \
                    u.username AS author_username, u.full_name AS author_full_name, \
                    u.avatar AS author_avatar \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             ORDER BY c.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn list_pending(&self) -> Result<Vec<CommentWithAuthor>, DomainError> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.content, c.author_id, c.article_id, c.is_approved, \
                    c.created_at, c.updated_at, \
                    u.username AS author_username, u.full_name AS author_full_name, \
                    u.avatar AS author_avatar \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.is_approved = FALSE \
             ORDER BY c.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn approve(&self, id: i64) -> Result<Comment, DomainError> {
        // Idempotent by construction: re-approving rewrites TRUE over TRUE.
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET is_approved = TRUE, updated_at = NOW() WHERE id = $1 \
             RETURNING id, content, author_id, article_id, is_approved, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound("Komentar tidak ditemukan".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Komentar tidak ditemukan".to_string()));
        }
        Ok(())
    }
}
