//! API error handling.
//!
//! Every failure is rendered as `{"error": <message>, "code": <code>}`. The
//! message is the pipeline's message verbatim; the status and code come from
//! the failure's [`FailureKind`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use fintake::pipeline::{FailureKind, PipelineError};

// =============================================================================
// API Error
// =============================================================================

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error details.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", message),
        )
    }
}

/// Status and code for a failure kind.
#[must_use]
pub const fn classify(kind: FailureKind) -> (StatusCode, &'static str) {
    match kind {
        FailureKind::Structural => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        FailureKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        FailureKind::Conflict => (StatusCode::BAD_REQUEST, "ALREADY_REGISTERED"),
        FailureKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        FailureKind::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        FailureKind::Resource => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        FailureKind::Fault => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PipelineError> for ApiErrorResponse {
    fn from(error: PipelineError) -> Self {
        let kind = error.kind();
        let (status, code) = classify(kind);
        if status.is_server_error() {
            tracing::error!(%error, ?kind, "request failed");
        } else {
            tracing::debug!(%error, ?kind, "request rejected");
        }
        Self::new(status, ApiError::new(code, error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fintake::auth::TokenError;
    use fintake::control::Fault;
    use fintake::repository::RepositoryError;
    use fintake::validation::{CredentialError, FinancialError, PayloadError};
    use rstest::rstest;

    #[rstest]
    fn test_api_error_serializes_error_and_code() {
        let error = ApiError::new("UNAUTHORIZED", "Token inválido");

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({"error": "Token inválido", "code": "UNAUTHORIZED"})
        );
    }

    #[rstest]
    #[case(PayloadError::NotJson.into(), StatusCode::BAD_REQUEST)]
    #[case(FinancialError::MissingFields(vec!["fuente_principal"]).into(), StatusCode::BAD_REQUEST)]
    #[case(CredentialError::AlreadyRegistered.into(), StatusCode::BAD_REQUEST)]
    #[case(TokenError::Missing.into(), StatusCode::UNAUTHORIZED)]
    #[case(TokenError::Invalid.into(), StatusCode::UNAUTHORIZED)]
    #[case(CredentialError::Incorrect.into(), StatusCode::UNAUTHORIZED)]
    #[case(RepositoryError::StorageError("disk full".to_string()).into(), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(PipelineError::from(Fault::new("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_pipeline_error_status(#[case] error: PipelineError, #[case] expected: StatusCode) {
        let message = error.to_string();
        let response = ApiErrorResponse::from(error);

        assert_eq!(response.status, expected);
        assert_eq!(response.error.error, message);
    }

    #[rstest]
    fn test_internal_error() {
        let response = ApiErrorResponse::internal_error("worker lost");
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "INTERNAL_ERROR");
    }
}
