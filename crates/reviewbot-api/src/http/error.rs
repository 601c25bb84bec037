//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use reviewbot_types::error::{CustomerError, TriggerError};

use super::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Customer(CustomerError),
    Trigger(TriggerError),
    /// Malformed or incomplete request body.
    Validation(String),
}

impl From<CustomerError> for AppError {
    fn from(e: CustomerError) -> Self {
        AppError::Customer(e)
    }
}

impl From<TriggerError> for AppError {
    fn from(e: TriggerError) -> Self {
        AppError::Trigger(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Customer(CustomerError::MissingRequiredFields) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Missing required fields".to_string(),
            ),
            AppError::Customer(CustomerError::EmailConflict(email)) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Customer with email '{email}' already exists"),
            ),
            AppError::Customer(CustomerError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Failed to store customer".to_string(),
            ),
            AppError::Trigger(TriggerError::SessionNotFound(email)) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                format!("No live review session for '{email}'"),
            ),
            AppError::Trigger(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Failed to deliver review".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, error = ?self, "Request failed");
        }
        (status, Json(ApiResponse::error(code, &message))).into_response()
    }
}
