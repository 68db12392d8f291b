use serde::{Deserialize, Serialize};

use crate::common::ApiError;
use crate::domains::registration::models::{is_valid_email, MIN_SECRET_LEN};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Optional time-based one-time code; checked only when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totp: Option<String>,
}

impl LoginRequest {
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
