use super::entity::{NewUser, ProfileUpdate, Role, User};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;
    async fn update_profile(&self, id: i64, update: ProfileUpdate) -> Result<User, DomainError>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), DomainError>;
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Apply a role change and its audit record as one transactional unit.
    ///
    /// Returns `NotFound` when the target does not exist; on any failure of
    /// the audit insert the role mutation is rolled back. This is the only
    /// write path to `users.role` in the system.
    async fn change_role_logged(
        &self,
        target_user_id: i64,
        new_role: Role,
        actor_id: i64,
        detail: &str,
    ) -> Result<User, DomainError>;
}
