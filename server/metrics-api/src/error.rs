//! Standardized API error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  Internal(String),
}

impl ApiError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
  code: &'static str,
  message: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, code) = match &self {
      Self::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
      Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
      Self::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
      Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };
    let body = ErrorBody {
      code,
      message: self.to_string(),
    };
    (status, Json(body)).into_response()
  }
}
