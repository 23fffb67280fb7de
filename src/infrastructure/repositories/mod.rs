pub mod sqlx_audit_repository;
pub mod sqlx_comment_repository;
pub mod sqlx_social_repository;
pub mod sqlx_user_repository;
