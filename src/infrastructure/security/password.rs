use crate::domain::shared::errors::DomainError;
use bcrypt::DEFAULT_COST;

/// One hashing policy for every password write and check: registration,
/// login, profile change, reset, and the role-change re-authentication all go
/// through here.
pub fn hash_password(plain: &str) -> Result<String, DomainError> {
    bcrypt::hash(plain, DEFAULT_COST)
        .map_err(|e| DomainError::InfrastructureError(format!("Password hashing failed: {}", e)))
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, DomainError> {
    bcrypt::verify(plain, hash)
        .map_err(|e| DomainError::InfrastructureError(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    #[test]
    fn hash_and_verify_round_trip() {
        // DEFAULT_COST is slow by design; one round trip keeps the test honest.
        let hash = hash_password("rahasia123").unwrap();
        assert!(verify_password("rahasia123", &hash).unwrap());
        assert!(!verify_password("salah", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("x", "not-a-bcrypt-hash").is_err());
    }
}
