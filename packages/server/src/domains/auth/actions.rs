//! Login action: salted-hash check plus optional TOTP.

use tracing::info;

use crate::common::{ApiError, MessageResponse};
use crate::data::TableKind;
use crate::domains::auth::models::LoginRequest;
use crate::domains::auth::totp::validate_totp_code;
use crate::domains::registration::models::hash_password;
use crate::kernel::ServerDeps;

/// Verify credentials against the administrator accounts for this email.
///
/// Unknown email and wrong password both map to the same 400 so the endpoint
/// does not reveal whether an account exists. When a TOTP code is supplied it
/// must also validate against the secret derived from the account id and the
/// account's password salt.
pub async fn login(deps: &ServerDeps, request: LoginRequest) -> Result<MessageResponse, ApiError> {
    request.validate()?;

    let accounts = deps
        .store
        .list_by_owner(TableKind::Admins, &request.email)
        .await?;

    let account = accounts.iter().find(|account| {
        match (account.attr_str("salt"), account.attr_str("password")) {
            (Some(salt), Some(stored)) => hash_password(salt, &request.password) == stored,
            _ => false,
        }
    });

    let Some(account) = account else {
        info!(email = %request.email, "Login rejected");
        return Err(ApiError::Validation(
            "Invalid email or password".to_string(),
        ));
    };

    if let Some(code) = request.totp.as_deref().filter(|code| !code.is_empty()) {
        let salt = account.attr_str("salt").unwrap_or_default();
        if !validate_totp_code(&account.id, salt, code) {
            info!(email = %request.email, "Login rejected: bad TOTP code");
            return Err(ApiError::Validation("Invalid TOTP code".to_string()));
        }
    }

    info!(email = %request.email, "Login successful");
    Ok(MessageResponse::new("Login successful"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use base32::Alphabet;
    use sqlx::sqlite::SqlitePoolOptions;
    use totp_rs::{Algorithm, TOTP};
    use uuid::Uuid;

    use super::*;
    use crate::data::{Object, Store};
    use crate::domains::auth::totp::derive_totp_secret;
    use crate::html::Templates;
    use crate::kernel::MockMailer;

    const EMAIL: &str = "admin@example.com";
    const PASSWORD: &str = "abc123#8";

    async fn deps_with_account() -> (ServerDeps, Object) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database should open");
        let store = Store::new(pool);
        store.provision().await.expect("provisioning should succeed");

        let salt = Uuid::new_v4().to_string();
        let mut account = Object::new(Uuid::new_v4().to_string(), EMAIL, 1);
        account.set_attr("email", EMAIL);
        account.set_attr("password", hash_password(&salt, PASSWORD));
        account.set_attr("salt", salt);
        store.insert(TableKind::Admins, &account).await.unwrap();

        let deps = ServerDeps::new(
            store,
            Arc::new(Templates::new().expect("embedded templates should parse")),
            Arc::new(MockMailer::new()),
            "http://localhost:8080".to_string(),
        );
        (deps, account)
    }

    fn login_request(password: &str, totp: Option<String>) -> LoginRequest {
        LoginRequest {
            email: EMAIL.to_string(),
            password: password.to_string(),
            totp,
        }
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_password() {
        let (deps, _) = deps_with_account().await;
        let response = login(&deps, login_request(PASSWORD, None)).await.unwrap();
        assert_eq!(response.message, "Login successful");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_email() {
        let (deps, _) = deps_with_account().await;

        assert!(matches!(
            login(&deps, login_request("wrong-password", None)).await,
            Err(ApiError::Validation(_))
        ));

        let unknown = LoginRequest {
            email: "nobody@example.com".to_string(),
            password: PASSWORD.to_string(),
            totp: None,
        };
        assert!(matches!(
            login(&deps, unknown).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn login_checks_totp_when_supplied() {
        let (deps, account) = deps_with_account().await;
        let salt = account.attr_str("salt").unwrap();

        let secret = derive_totp_secret(&account.id, salt);
        let secret_bytes =
            base32::decode(Alphabet::Rfc4648 { padding: false }, &secret).unwrap();
        let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, secret_bytes).unwrap();
        let code = totp.generate_current().unwrap();

        login(&deps, login_request(PASSWORD, Some(code)))
            .await
            .unwrap();

        assert!(matches!(
            login(&deps, login_request(PASSWORD, Some("0".to_string()))).await,
            Err(ApiError::Validation(_))
        ));
    }
}
