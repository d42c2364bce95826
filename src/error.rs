use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::llm::LlmError;
use crate::shape::ShapeError;

/// Errors a handler is allowed to surface to the caller.
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
  #[error("{0}")]
  InvalidInput(String),

  #[error("{0}")]
  Configuration(String),

  #[error("{0}")]
  DataUnavailable(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
      ApiError::Configuration(_) | ApiError::DataUnavailable(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      ApiError::InvalidInput(_) => "invalid_input",
      ApiError::Configuration(_) => "configuration_error",
      ApiError::DataUnavailable(_) => "data_unavailable",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    error_response(self.status(), self.code(), &self.to_string())
  }
}

pub fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
  let body = Json(serde_json::json!({ "error": message, "code": code }));
  (status, body).into_response()
}

/// Anything that goes wrong after the model is invoked. Always absorbed into
/// a fallback payload.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
  #[error(transparent)]
  Llm(#[from] LlmError),

  #[error(transparent)]
  Shape(#[from] ShapeError),
}
