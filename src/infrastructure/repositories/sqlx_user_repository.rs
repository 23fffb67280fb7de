use crate::domain::{
    audit::user_log::ACTION_CHANGE_ROLE,
    shared::errors::DomainError,
    user::{
        entity::{NewUser, ProfileUpdate, Role, User},
        repository::UserRepository,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, full_name, avatar, is_active, \
             created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, full_name, avatar, is_active, \
             created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, full_name, avatar, is_active, \
             created_at, updated_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, full_name, role, avatar) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, username, email, password_hash, role, full_name, avatar, is_active, \
             created_at, updated_at",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role)
        .bind(&user.avatar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn update_profile(&self, id: i64, update: ProfileUpdate) -> Result<User, DomainError> {
        sqlx::query_as::<_, User>(
            "UPDATE users \
             SET full_name = $2, email = $3, \
                 password_hash = COALESCE($4, password_hash), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, username, email, password_hash, role, full_name, avatar, is_active, \
             created_at, updated_at",
        )
        .bind(id)
        .bind(&update.full_name)
        .bind(&update.email)
        .bind(&update.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound("User tidak ditemukan".to_string()))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("User tidak ditemukan".to_string()));
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, full_name, avatar, is_active, \
             created_at, updated_at FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn change_role_logged(
        &self,
        target_user_id: i64,
        new_role: Role,
        actor_id: i64,
        detail: &str,
    ) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        // Runs unconditionally even when the role is unchanged: a redundant
        // "from ADMIN to ADMIN" audit row is accepted behavior.
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING id, username, email, password_hash, role, full_name, avatar, is_active, \
             created_at, updated_at",
        )
        .bind(target_user_id)
        .bind(new_role)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound("User target tidak ditemukan".to_string()))?;

        sqlx::query(
            "INSERT INTO user_logs (actor_id, target_user_id, action, detail) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(actor_id)
        .bind(target_user_id)
        .bind(ACTION_CHANGE_ROLE)
        .bind(detail)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        Ok(user)
    }
}
