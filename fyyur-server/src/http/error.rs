//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Store failures are logged and reported without internal detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::db::repos::DbError;
use crate::models::ValidationError;

const INTERNAL_MESSAGE: &str = "an internal error occurred";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Delete blocked by dependents (409)
    Conflict { message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Stored data violates a reference (500, logged)
    Integrity { message: String },

    /// A create/update/delete failed; `summary` names the record and action
    Operation {
        summary: String,
        cause: Box<ApiError>,
    },
}

impl ApiError {
    /// Attach the record name and attempted action to a mutation failure.
    pub fn during(self, summary: impl Into<String>) -> Self {
        Self::Operation {
            summary: summary.into(),
            cause: Box::new(self),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Integrity { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Operation { cause, .. } => cause.status(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Database(_) => "internal_error",
            Self::Integrity { .. } => "integrity_error",
            Self::Operation { cause, .. } => cause.code(),
        }
    }

    /// Client-facing message; logs what it hides.
    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, id } => format!("{} '{}' not found", resource, id),
            Self::Conflict { message } => message.clone(),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                INTERNAL_MESSAGE.to_owned()
            }
            Self::Integrity { message } => {
                tracing::error!("Integrity error: {}", message);
                message.clone()
            }
            Self::Operation { cause, .. } => cause.message(),
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Operation { summary, cause } => {
                let mut body = json!({
                    "error": cause.code(),
                    "message": summary,
                    "detail": cause.message(),
                });
                if let Self::Validation(e) = cause.as_ref() {
                    body["field"] = json!(e.field());
                }
                body
            }
            Self::Validation(e) => json!({
                "error": self.code(),
                "message": e.to_string(),
                "field": e.field(),
            }),
            _ => json!({
                "error": self.code(),
                "message": self.message(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Validation(e) => Self::Validation(e),
            DbError::Conflict { .. } => Self::Conflict {
                message: e.to_string(),
            },
            DbError::Integrity { .. } => Self::Integrity {
                message: e.to_string(),
            },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}
