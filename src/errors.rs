use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Errors raised by the assessment pipeline.
///
/// Every variant is terminal for the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// A metric cannot be computed because its input collection is empty or too small.
    InsufficientData(String),
    /// A denominator (monthly income, credit volume) is zero or non-positive.
    InvalidInput(String),
}

impl fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentError::InsufficientData(msg) => write!(f, "Insufficient data: {}", msg),
            AssessmentError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for AssessmentError {}

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The assessment pipeline rejected the request.
    Assessment(AssessmentError),
    /// Bad request error (invalid input shape or values).
    BadRequest(String),
    /// No credential was presented.
    Unauthorized(String),
    /// A credential was presented but is not valid.
    Forbidden(String),
    /// Internal server error.
    InternalError(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Assessment(e) => write!(f, "Assessment failed: {}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    /// Logs errors appropriately based on their severity.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Assessment(e) => {
                tracing::info!("Assessment rejected: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                (StatusCode::UNAUTHORIZED, "Missing API key".to_string())
            }
            AppError::Forbidden(msg) => {
                tracing::warn!("Forbidden access: {}", msg);
                (StatusCode::FORBIDDEN, "Invalid API key".to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<AssessmentError> for AppError {
    /// Converts a pipeline error into an `AppError`.
    fn from(err: AssessmentError) -> Self {
        AppError::Assessment(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_errors_map_to_unprocessable() {
        let response =
            AppError::from(AssessmentError::InvalidInput("monthly income is zero".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response =
            AppError::from(AssessmentError::InsufficientData("no transactions".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_auth_errors_status_codes() {
        assert_eq!(
            AppError::Unauthorized("missing".into())
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("bad key".into())
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_display_keeps_description() {
        let err = AppError::from(AssessmentError::InvalidInput("monthly income is zero".into()));
        assert_eq!(
            err.to_string(),
            "Assessment failed: Invalid input: monthly income is zero"
        );
    }
}
