use super::dto::ChangeRoleRequest;
use crate::domain::shared::errors::DomainError;
use crate::domain::user::entity::{Role, User};
use crate::domain::user::repository::UserRepository;
use crate::infrastructure::security::password::verify_password;
use std::str::FromStr;
use std::sync::Arc;

/// Changes a target user's role, gated by re-entry of the acting user's own
/// password at the moment of the change.
///
/// The session token alone is not trusted for this mutation: an unattended
/// terminal or hijacked token must not be enough to escalate privileges, so
/// the actor re-proves their identity every time, even when changing someone
/// else's role. Verify, mutate, and audit form one step — the audit row is
/// written in the same transaction as the role update, and any failure before
/// the mutation leaves no partial state.
pub struct ChangeRoleUseCase {
    users: Arc<dyn UserRepository>,
}

impl ChangeRoleUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(
        &self,
        actor_id: i64,
        target_user_id: i64,
        request: ChangeRoleRequest,
    ) -> Result<User, DomainError> {
        let role_raw = request
            .role
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let password = request.password.as_deref().filter(|s| !s.is_empty());
        let (Some(role_raw), Some(password)) = (role_raw, password) else {
            return Err(DomainError::ValidationError(
                "Role dan password diperlukan".to_string(),
            ));
        };

        let new_role = Role::from_str(role_raw)
            .map_err(|_| DomainError::ValidationError("Role tidak valid".to_string()))?;

        // The actor already passed token auth; a missing row here means the
        // account vanished mid-session.
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| DomainError::AuthenticationError("User tidak ditemukan".to_string()))?;

        if !verify_password(password, &actor.password_hash)? {
            return Err(DomainError::AuthenticationError("Password salah".to_string()));
        }

        let target = self
            .users
            .find_by_id(target_user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User target tidak ditemukan".to_string()))?;

        // No short-circuit when the role is unchanged; the redundant audit
        // row is intentional.
        let detail = format!("from {} to {}", target.role, new_role);
        let updated = self
            .users
            .change_role_logged(target_user_id, new_role, actor_id, &detail)
            .await?;

        tracing::info!(actor_id, target_user_id, new_role = %new_role, "user role changed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::repository::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    // Cost 4 is the bcrypt floor; plenty for tests.
    fn hashed(password: &str) -> String {
        bcrypt::hash(password, 4).expect("bcrypt hash")
    }

    fn user(id: i64, role: Role, password: &str) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            password_hash: hashed(password),
            role,
            full_name: format!("User {}", id),
            avatar: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(role: &str, password: &str) -> ChangeRoleRequest {
        ChangeRoleRequest {
            role: Some(role.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn correct_password_changes_role_and_logs_detail() {
        let actor = user(1, Role::Developer, "admin123");
        let target = user(5, Role::User, "irrelevant");
        let mut updated = target.clone();
        updated.role = Role::Admin;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(move |_| Ok(Some(actor.clone())));
        repo.expect_find_by_id()
            .with(eq(5))
            .returning(move |_| Ok(Some(target.clone())));
        repo.expect_change_role_logged()
            .with(eq(5), eq(Role::Admin), eq(1), eq("from USER to ADMIN"))
            .times(1)
            .returning(move |_, _, _, _| Ok(updated.clone()));

        let use_case = ChangeRoleUseCase::new(Arc::new(repo));
        let result = use_case
            .execute(1, 5, request("ADMIN", "admin123"))
            .await
            .expect("role change should succeed");
        assert_eq!(result.role, Role::Admin);
    }

    #[tokio::test]
    async fn wrong_password_fails_without_mutation() {
        let actor = user(1, Role::Developer, "admin123");

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(move |_| Ok(Some(actor.clone())));
        repo.expect_change_role_logged().times(0);

        let use_case = ChangeRoleUseCase::new(Arc::new(repo));
        let err = use_case
            .execute(1, 5, request("ADMIN", "wrong-password"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::AuthenticationError(msg) if msg == "Password salah"
        ));
    }

    #[tokio::test]
    async fn missing_actor_is_an_authentication_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(99)).returning(|_| Ok(None));
        repo.expect_change_role_logged().times(0);

        let use_case = ChangeRoleUseCase::new(Arc::new(repo));
        let err = use_case
            .execute(99, 5, request("ADMIN", "admin123"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::AuthenticationError(msg) if msg == "User tidak ditemukan"
        ));
    }

    #[tokio::test]
    async fn missing_target_is_not_found_and_writes_no_audit_row() {
        let actor = user(1, Role::Developer, "admin123");

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(move |_| Ok(Some(actor.clone())));
        repo.expect_find_by_id().with(eq(42)).returning(|_| Ok(None));
        repo.expect_change_role_logged().times(0);

        let use_case = ChangeRoleUseCase::new(Arc::new(repo));
        let err = use_case
            .execute(1, 42, request("ADMIN", "admin123"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound(msg) if msg == "User target tidak ditemukan"
        ));
    }

    #[tokio::test]
    async fn missing_role_or_password_is_a_validation_error() {
        for request in [
            ChangeRoleRequest { role: None, password: Some("admin123".into()) },
            ChangeRoleRequest { role: Some("ADMIN".into()), password: None },
            ChangeRoleRequest { role: Some("  ".into()), password: Some("admin123".into()) },
        ] {
            let mut repo = MockUserRepository::new();
            repo.expect_find_by_id().times(0);
            repo.expect_change_role_logged().times(0);

            let use_case = ChangeRoleUseCase::new(Arc::new(repo));
            let err = use_case.execute(1, 5, request).await.unwrap_err();
            assert!(matches!(
                err,
                DomainError::ValidationError(msg) if msg == "Role dan password diperlukan"
            ));
        }
    }

    #[tokio::test]
    async fn unknown_role_value_is_rejected_before_any_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(0);

        let use_case = ChangeRoleUseCase::new(Arc::new(repo));
        let err = use_case
            .execute(1, 5, request("SUPERUSER", "admin123"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::ValidationError(msg) if msg == "Role tidak valid"
        ));
    }

    #[tokio::test]
    async fn same_role_change_still_writes_the_audit_row() {
        let actor = user(1, Role::Developer, "admin123");
        let target = user(5, Role::Admin, "irrelevant");
        let updated = target.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(move |_| Ok(Some(actor.clone())));
        repo.expect_find_by_id()
            .with(eq(5))
            .returning(move |_| Ok(Some(target.clone())));
        repo.expect_change_role_logged()
            .with(eq(5), eq(Role::Admin), eq(1), eq("from ADMIN to ADMIN"))
            .times(1)
            .returning(move |_, _, _, _| Ok(updated.clone()));

        let use_case = ChangeRoleUseCase::new(Arc::new(repo));
        let result = use_case
            .execute(1, 5, request("ADMIN", "admin123"))
            .await
            .expect("no-op role change should still succeed");
        assert_eq!(result.role, Role::Admin);
    }
}
