use crate::domain::article::entity::ArticleWithMeta;
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialRepository: Send + Sync {
    /// Toggle the user's like on an article; returns true when the like now
    /// exists.
    async fn toggle_like(&self, user_id: i64, article_id: i64) -> Result<bool, DomainError>;

    /// Toggle the user's bookmark on an article; returns true when the
    /// bookmark now exists.
    async fn toggle_bookmark(&self, user_id: i64, article_id: i64) -> Result<bool, DomainError>;

    /// The user's bookmarked articles, newest bookmark first.
    async fn list_bookmarks(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ArticleWithMeta>, i64), DomainError>;
}
