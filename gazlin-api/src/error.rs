//! API error responses.
//!
//! Every failure leaves the service as `{"error": message, "detail": detail}`
//! with the matching status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gazlin_translate::TranslateError;
use serde_json::json;

use crate::auth::AuthError;
use crate::models::ValidationError;
use crate::store::StoreError;
use crate::users::UserError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &str, detail: impl Into<String>) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail: detail.into(),
        }
    }

    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid input", detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Resource not found", detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Authorization required", "")
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Access denied", "")
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "User already exists", detail)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", "")
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Translation service temporarily unavailable",
            detail,
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.message, self.detail)
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.message,
                "detail": self.detail,
            })),
        )
            .into_response()
    }
}

impl From<TranslateError> for ApiError {
    fn from(err: TranslateError) -> Self {
        match &err {
            TranslateError::ServiceUnavailable(_) => ApiError::unavailable(err.to_string()),
            TranslateError::TranslationFailed(_) | TranslateError::InvalidResponse(_) => {
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Translation error",
                    err.to_string(),
                )
            }
            TranslateError::UnsupportedLanguage(_) | TranslateError::EmptyInput => {
                ApiError::invalid_input(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized(_) => ApiError::unauthorized(),
            AuthError::Forbidden => ApiError::forbidden(),
            AuthError::Internal(_) => ApiError::internal(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::not_found("mineral not found"),
            StoreError::Backend(_) => ApiError::internal(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::AlreadyExists(_) => ApiError::conflict(err.to_string()),
            UserError::EmptyCredentials => ApiError::invalid_input(err.to_string()),
            UserError::Crypto => ApiError::internal(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid_input(err.to_string())
    }
}
