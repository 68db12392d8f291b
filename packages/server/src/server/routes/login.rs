use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::Json;

use crate::common::{ApiError, MessageResponse};
use crate::domains::auth::{login, LoginRequest};
use crate::server::app::AxumAppState;

/// `POST /api/login`
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|_| ApiError::Validation("Invalid request payload".to_string()))?;
    let response = login(&state.deps, request).await?;
    Ok(Json(response))
}
