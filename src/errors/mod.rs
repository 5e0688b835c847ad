use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::db::RepositoryError;

/// Field name (camelCase, as the client sent it) to the messages for that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("One or more validation errors occurred.")]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn email_taken() -> Self {
        AppError::Conflict("Email already exists.".to_string())
    }

    pub fn employee_not_found() -> Self {
        AppError::NotFound("Employee not found.".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attaches the request path so the error can be rendered at the HTTP boundary.
    pub fn at(self, path: &str) -> ApiError {
        ApiError {
            error: self,
            path: path.to_string(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateEmail => AppError::email_taken(),
            RepositoryError::Database(err) => AppError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// An [`AppError`] bound to the request it failed, rendered as [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub path: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error, self.path)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.error.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (message, errors) = match &self.error {
            AppError::Validation(fields) => (self.error.to_string(), Some(fields.clone())),
            AppError::Internal(detail) => {
                log::error!("Unhandled error on {}: {}", self.path, detail);
                (UNEXPECTED_ERROR_MESSAGE.to_string(), None)
            }
            other => (other.to_string(), None),
        };

        HttpResponse::build(status).json(ErrorResponse {
            status_code: status.as_u16(),
            message,
            details: self.path.clone(),
            errors,
        })
    }
}
