use std::error::Error as _;

use axum::{
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Message returned for every 5xx; the real cause only goes to the log.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            // Dependency guard and duplicate license.
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message a caller is allowed to see.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::Conflict(msg) => msg,
            AppError::Database(_) | AppError::Internal(_) => SERVER_ERROR_MESSAGE,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        match rejection {
            JsonRejection::JsonDataError(err) => {
                // serde reports "<field>: <problem> at line L column C"; keep the field part.
                let detail = err
                    .source()
                    .map(|source| source.to_string())
                    .unwrap_or_default();
                let detail = detail.split(" at line ").next().unwrap_or_default();
                if detail.is_empty() {
                    AppError::ValidationError("Invalid request body".to_string())
                } else {
                    AppError::ValidationError(format!("Invalid request body: {}", detail))
                }
            }
            JsonRejection::JsonSyntaxError(_) => {
                AppError::BadRequest("Malformed JSON body".to_string())
            }
            JsonRejection::MissingJsonContentType(_) => {
                AppError::BadRequest("Expected a JSON body (Content-Type: application/json)".to_string())
            }
            _ => AppError::BadRequest("Invalid request body".to_string()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
                // Every path parameter in this API is a numeric id.
                ErrorKind::ParseError { value, .. }
                | ErrorKind::ParseErrorAtKey { value, .. }
                | ErrorKind::ParseErrorAtIndex { value, .. } => {
                    AppError::ValidationError(format!("Invalid id: '{}'", value))
                }
                // Handler and route disagree on the parameters.
                ErrorKind::WrongNumberOfParameters { .. } | ErrorKind::UnsupportedType { .. } => {
                    AppError::Internal(err.body_text())
                }
                _ => AppError::ValidationError("Invalid path parameter".to_string()),
            },
            PathRejection::MissingPathParams(err) => AppError::Internal(err.body_text()),
            _ => AppError::BadRequest("Invalid path parameter".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Error: {}: {}", status, self);
        } else {
            tracing::warn!("Error: {}: {}", status, self.public_message());
        }

        let body = Json(json!({
            "error": self.public_message()
        }));

        (status, body).into_response()
    }
}
