//! Login and stateless TOTP validation.

pub mod actions;
pub mod models;
pub mod totp;

pub use actions::login;
pub use models::LoginRequest;
pub use totp::{derive_totp_secret, validate_totp_code};
