use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::common::ApiError;

/// Minimum length for passwords and seeds.
pub const MIN_SECRET_LEN: usize = 8;

lazy_static! {
    // Email pattern - RFC 5322 simplified
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$"
    ).unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Salted password hash: `hex(SHA256(salt ‖ password))`. Deterministic for a
/// given salt, so stored hashes can be re-derived at login.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateRegistrationRequest {
    pub email: String,
    pub password: String,
}

impl InitiateRegistrationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_valid_email(&self.email) {
            return Err(ApiError::Validation("Invalid email address".to_string()));
        }
        if self.password.len() < MIN_SECRET_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {} characters",
                MIN_SECRET_LEN
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateRegistrationResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteRegistrationRequest {
    pub token: String,
    pub seed: String,
}

impl CompleteRegistrationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if Uuid::parse_str(&self.token).is_err() {
            return Err(ApiError::Validation("Invalid registration token".to_string()));
        }
        if self.seed.len() < MIN_SECRET_LEN {
            return Err(ApiError::Validation(format!(
                "Seed must be at least {} characters",
                MIN_SECRET_LEN
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
    }

    #[test]
    fn password_hash_is_deterministic_per_salt() {
        let hash = hash_password("salt-a", "abc123#8");
        assert_eq!(hash, hash_password("salt-a", "abc123#8"));
        assert_ne!(hash, hash_password("salt-b", "abc123#8"));
        assert_ne!(hash, hash_password("salt-a", "different"));
        // hex-encoded SHA-256
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn initiate_request_validation() {
        let valid = InitiateRegistrationRequest {
            email: "user@example.com".to_string(),
            password: "abc123#8".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = InitiateRegistrationRequest {
            email: "invalid".to_string(),
            password: "abc123#8".to_string(),
        };
        assert!(matches!(
            bad_email.validate(),
            Err(ApiError::Validation(_))
        ));

        let short_password = InitiateRegistrationRequest {
            email: "user@example.com".to_string(),
            password: "abc".to_string(),
        };
        assert!(matches!(
            short_password.validate(),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn complete_request_validation() {
        let valid = CompleteRegistrationRequest {
            token: Uuid::new_v4().to_string(),
            seed: "12345678".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_token = CompleteRegistrationRequest {
            token: "not-a-uuid".to_string(),
            seed: "12345678".to_string(),
        };
        assert!(matches!(bad_token.validate(), Err(ApiError::Validation(_))));

        let short_seed = CompleteRegistrationRequest {
            token: Uuid::new_v4().to_string(),
            seed: "1234".to_string(),
        };
        assert!(matches!(short_seed.validate(), Err(ApiError::Validation(_))));
    }
}
