//! Registration domain actions.

use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::common::{ApiError, MessageResponse};
use crate::data::{Object, StoreError, TableKind};
use crate::domains::registration::models::{
    hash_password, CompleteRegistrationRequest, InitiateRegistrationRequest,
    InitiateRegistrationResponse,
};
use crate::kernel::ServerDeps;

pub const REGISTRATION_EMAIL_SUBJECT: &str = "LinuxFleet Registration";

/// Start a registration: persist a pending signup record keyed by a
/// single-use token and email the confirmation link.
///
/// There is no dedup per email: initiating twice yields two independent
/// pending tokens. If the email fails after the insert, the pending record
/// stays behind and the caller must re-initiate with a fresh token.
pub async fn initiate_registration(
    deps: &ServerDeps,
    request: InitiateRegistrationRequest,
) -> Result<InitiateRegistrationResponse, ApiError> {
    request.validate()?;

    let token = Uuid::new_v4().to_string();
    let salt = Uuid::new_v4().to_string();

    let registration_url = format!(
        "{}/registration/complete?token={}",
        deps.base_url.trim_end_matches('/'),
        token
    );
    let html = deps
        .templates
        .render("registration-email", &json!({ "url": registration_url }))?;

    let mut signup = Object::new(token.clone(), request.email.clone(), 1);
    signup.set_attr("email", request.email.clone());
    signup.set_attr("password", hash_password(&salt, &request.password));
    signup.set_attr("salt", salt);

    deps.store.insert(TableKind::Signups, &signup).await?;

    deps.mailer
        .send_email(&request.email, REGISTRATION_EMAIL_SUBJECT, &html)
        .await
        .map_err(|e| {
            error!(email = %request.email, error = %e, "Failed to send registration email");
            ApiError::Email(e)
        })?;

    info!(email = %request.email, "Registration initiated");
    Ok(InitiateRegistrationResponse { token })
}

/// Redeem a registration token: copy the pending record's attributes, add
/// the caller-supplied seed, and create a confirmed administrator account.
///
/// The pending record is left in place, so redeeming the same token again
/// creates another account.
pub async fn complete_registration(
    deps: &ServerDeps,
    request: CompleteRegistrationRequest,
) -> Result<MessageResponse, ApiError> {
    request.validate()?;

    let pending = match deps.store.get_by_id(TableKind::Signups, &request.token).await {
        Ok(obj) => obj,
        Err(StoreError::NotFound) => {
            return Err(ApiError::NotFound(
                "The registration does not exist".to_string(),
            ))
        }
        Err(err) => return Err(err.into()),
    };

    let account_id = Uuid::new_v4().to_string();
    let mut account = Object::new(account_id.clone(), pending.owner_id.clone(), 1);
    account.attributes = pending.attributes.clone();
    account.set_attr("seed", request.seed);

    deps.store.insert(TableKind::Admins, &account).await?;

    info!(account_id = %account_id, "Registration completed");
    Ok(MessageResponse::new(
        "User registration was completed successfully",
    ))
}
