//! Application-level error type for HTTP handlers.
//!
//! Wraps [`AdmissionError`] for domain rejections and adds HTTP-specific
//! variants. Implements [`IntoResponse`] to produce consistent
//! `{ "error", "code" }` JSON bodies, mapping every domain rejection to a
//! specific, actionable message and status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use gather_core::error::AdmissionError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level rejection from the admission engine.
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    /// Request body failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Admission(err) => match err {
                AdmissionError::Ineligible { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INCOMPLETE_PROFILE",
                    err.to_string(),
                ),
                AdmissionError::Conflict { .. } => {
                    (StatusCode::CONFLICT, "TRACK_CONFLICT", err.to_string())
                }
                AdmissionError::AtCapacity { .. } => {
                    (StatusCode::CONFLICT, "AT_CAPACITY", err.to_string())
                }
                AdmissionError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "INVALID_TRANSITION", err.to_string())
                }
                AdmissionError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
                }
                AdmissionError::Persistence(msg) => {
                    tracing::error!(error = %msg, "Store failure");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "STORE_UNAVAILABLE",
                        "The service is temporarily unavailable".to_string(),
                    )
                }
            },

            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_core::capacity::AdmissionUnit;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn domain_rejections_map_to_specific_statuses() {
        assert_eq!(
            status_of(AppError::Admission(AdmissionError::Ineligible {
                missing_fields: vec!["phone".into()]
            })),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Admission(AdmissionError::AtCapacity {
                unit: AdmissionUnit::Event(uuid::Uuid::new_v4())
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Admission(AdmissionError::Conflict {
                group: "G".into(),
                conflicting_tracks: vec!["T".into()]
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Admission(AdmissionError::NotFound {
                entity: "event",
                id: uuid::Uuid::new_v4()
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Admission(AdmissionError::Persistence("x".into()))),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(
            status_of(AppError::Unauthorized("no token".into())),
            StatusCode::UNAUTHORIZED
        );
    }
}
