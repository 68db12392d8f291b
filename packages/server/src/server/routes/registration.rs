use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::Json;

use crate::common::{ApiError, MessageResponse};
use crate::domains::registration::{
    complete_registration, initiate_registration, CompleteRegistrationRequest,
    InitiateRegistrationRequest, InitiateRegistrationResponse,
};
use crate::server::app::AxumAppState;

// A body axum cannot parse must still produce the {"error": ...} envelope,
// so the Json rejection is folded into the validation error.
fn bind<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(request)| request)
        .map_err(|_| ApiError::Validation("Invalid request payload".to_string()))
}

/// `POST /api/registration/initiate`
pub async fn initiate_registration_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<InitiateRegistrationRequest>, JsonRejection>,
) -> Result<Json<InitiateRegistrationResponse>, ApiError> {
    let request = bind(payload)?;
    let response = initiate_registration(&state.deps, request).await?;
    Ok(Json(response))
}

/// `POST /api/registration/complete`
pub async fn complete_registration_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<CompleteRegistrationRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = bind(payload)?;
    let response = complete_registration(&state.deps, request).await?;
    Ok(Json(response))
}
