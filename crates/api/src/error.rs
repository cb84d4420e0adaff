//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors render as a JSON
//! problem document:
//!
//! ```json
//! {"title": "Bad Request", "status": 400, "message": "error.idexists",
//!  "entityName": "backendProduct", "errorKey": "idexists"}
//! ```
//!
//! Server errors are captured to Sentry before responding and never leak
//! their details to the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use mini_shop_core::{FilterError, PageError};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::db::RepositoryError;
use crate::routes::headers;
use crate::services::ServiceError;

const PROBLEM_JSON: &str = "application/problem+json";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Request body failed field validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A filter query parameter could not be parsed.
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    /// Paging query parameters could not be parsed.
    #[error("Invalid paging: {0}")]
    Paging(#[from] PageError),

    /// A rejected write, reported with alert headers.
    #[error("Bad request: {message}")]
    BadRequestAlert {
        message: String,
        entity_name: &'static str,
        error_key: &'static str,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// A 400 carrying `X-backendApp-error` / `X-backendApp-params` headers.
    #[must_use]
    pub fn bad_request_alert(
        message: impl Into<String>,
        entity_name: &'static str,
        error_key: &'static str,
    ) -> Self {
        Self::BadRequestAlert {
            message: message.into(),
            entity_name,
            error_key,
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::InvalidReference(_) | RepositoryError::InvalidSort(_) => {
                    StatusCode::BAD_REQUEST
                }
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_)
            | Self::Filter(_)
            | Self::Paging(_)
            | Self::BadRequestAlert { .. }
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translation key sent as `message`.
    fn message_key(&self, status: StatusCode) -> String {
        match self {
            Self::BadRequestAlert { error_key, .. } => format!("error.{error_key}"),
            Self::Validation(_) => "error.validation".to_string(),
            Self::Database(RepositoryError::InvalidReference(_)) => "error.idnotfound".to_string(),
            _ => format!("error.http.{}", status.as_u16()),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => Self::Validation(errors),
            ServiceError::Repository(err) => Self::Database(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldErrorBody {
    field: String,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProblemBody {
    title: &'static str,
    status: u16,
    detail: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_key: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    field_errors: Vec<FieldErrorBody>,
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldErrorBody> {
    let mut fields: Vec<FieldErrorBody> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldErrorBody {
                field: field.to_string(),
                message: err.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        // Don't expose internal error details to clients
        let detail = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let (entity_name, error_key) = match &self {
            Self::BadRequestAlert {
                entity_name,
                error_key,
                ..
            } => (Some(*entity_name), Some(*error_key)),
            _ => (None, None),
        };

        let body = ProblemBody {
            title: status.canonical_reason().unwrap_or("Error"),
            status: status.as_u16(),
            detail,
            message: self.message_key(status),
            entity_name,
            error_key,
            field_errors: match &self {
                Self::Validation(errors) => field_errors(errors),
                _ => Vec::new(),
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let (Some(entity_name), Some(error_key)) = (entity_name, error_key) {
            response
                .headers_mut()
                .extend(headers::failure_alert(entity_name, error_key));
        }
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
