//! Typed error handling for the crudkit dispatch layer
//!
//! Every failure state a CRUD operation can produce is an explicit value of
//! [`CrudError`]; nothing in the dispatch path panics or uses exceptions for
//! control flow. The variants map one-to-one onto transport status codes:
//!
//! - [`CrudError::Forbidden`] → 403
//! - [`CrudError::NotFound`] → 404
//! - [`CrudError::IdMismatch`] / [`CrudError::Validation`] → 400
//! - [`CrudError::Storage`] / [`CrudError::Internal`] → 500
//!
//! Validation failures carry an ordered list of [`FieldError`]s which is
//! serialized into the response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// A single field-level error descriptor.
///
/// `message` is already resolved through the message catalog; when no catalog
/// entry exists it is the message key verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The error type shared by the dispatchers, the service contract and the
/// in-memory store.
#[derive(Debug, Error)]
pub enum CrudError {
    /// The current principal does not satisfy the required policy.
    #[error("permission denied")]
    Forbidden,

    /// Lookup by id came back empty.
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    /// Path id and body id disagree on an update.
    #[error("path id does not match body id")]
    IdMismatch,

    /// Model validation failed; order of the field errors is preserved.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The downstream store misbehaved.
    #[error("storage error: {0}")]
    Storage(String),

    /// Should not happen in normal operation.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error envelope written into HTTP responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-level errors for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl CrudError {
    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        CrudError::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CrudError::Forbidden => StatusCode::FORBIDDEN,
            CrudError::NotFound { .. } => StatusCode::NOT_FOUND,
            CrudError::IdMismatch => StatusCode::BAD_REQUEST,
            CrudError::Validation(_) => StatusCode::BAD_REQUEST,
            CrudError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CrudError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CrudError::Forbidden => "FORBIDDEN",
            CrudError::NotFound { .. } => "NOT_FOUND",
            CrudError::IdMismatch => "ID_MISMATCH",
            CrudError::Validation(_) => "VALIDATION_FAILED",
            CrudError::Storage(_) => "STORAGE_ERROR",
            CrudError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response envelope
    pub fn to_response(&self) -> ErrorResponse {
        let errors = match self {
            CrudError::Validation(errors) => Some(errors.clone()),
            _ => None,
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            errors,
        }
    }
}

impl IntoResponse for CrudError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// A specialized Result type for CRUD operations
pub type CrudResult<T> = Result<T, CrudError>;
