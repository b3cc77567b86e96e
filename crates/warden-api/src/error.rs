//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// A domain rule rejected the request: validation failures map to 422,
  /// guarded-transition and occupancy failures to 409.
  #[error(transparent)]
  Domain(#[from] warden_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Domain(e) if e.is_state_error() => {
        (StatusCode::CONFLICT, e.to_string())
      }
      ApiError::Domain(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// Wrap a backend failure. Handlers use this with `map_err`.
pub fn store_err<E>(e: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Store(Box::new(e))
}
