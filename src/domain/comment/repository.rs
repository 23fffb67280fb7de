use super::entity::{Comment, CommentWithAuthor, NewComment};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: NewComment) -> Result<Comment, DomainError>;

    /// Approved comments for the public article view, newest first.
    async fn list_approved_by_article(
        &self,
        article_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, DomainError>;

    async fn list_all(&self) -> Result<Vec<CommentWithAuthor>, DomainError>;
    async fn list_pending(&self) -> Result<Vec<CommentWithAuthor>, DomainError>;

    /// Idempotent: approving an already-approved comment succeeds unchanged.
    /// Unknown ids are `NotFound`.
    async fn approve(&self, id: i64) -> Result<Comment, DomainError>;

    /// Unknown ids are `NotFound`, so a second delete of the same id fails.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}
