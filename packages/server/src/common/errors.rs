use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::data::StoreError;

/// Errors surfaced to HTTP callers.
///
/// Every variant maps to one status code and renders as `{"error": message}`.
/// Downstream failures (storage, templates, email) all collapse to 500; the
/// caller's only recovery is to retry the whole operation.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to store user data")]
    Storage(#[from] StoreError),

    #[error("Failed to execute email template")]
    Template(#[from] handlebars::RenderError),

    #[error("Failed to send registration email")]
    Email(#[source] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Template(_) | ApiError::Email(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("missing".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Storage(StoreError::Conflict).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Email(anyhow::anyhow!("smtp down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
