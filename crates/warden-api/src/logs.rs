//! Handlers for `/logs` endpoints.
//!
//! Log entries are append-only: there is no update or delete route, and the
//! store exposes none.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use warden_core::{
  log::{LogLevel, SecurityLog},
  report::filter_by_time_window,
  store::FacilityStore,
};

use crate::error::{ApiError, store_err};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Keep entries logged within the last N hours; `0` (the default)
  /// returns everything.
  #[serde(default)]
  pub hours_back: u32,
}

/// `GET /logs[?hours_back=24]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<SecurityLog>>, ApiError>
where
  S: FacilityStore,
{
  let logs = store.list_logs().await.map_err(store_err)?;
  let logs = filter_by_time_window(
    &logs,
    SecurityLog::logged_at,
    params.hours_back,
    Utc::now(),
  )
  .into_iter()
  .cloned()
  .collect();
  Ok(Json(logs))
}

/// JSON body accepted by `POST /logs`.
#[derive(Debug, Deserialize)]
pub struct NewLogBody {
  pub message: String,
  pub level:   LogLevel,
  pub source:  Option<String>,
}

/// `POST /logs` — returns 201 + the recorded entry.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewLogBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
{
  let entry = SecurityLog::new(
    Uuid::new_v4().to_string(),
    body.message,
    body.level,
    body.source,
    Utc::now(),
  )?;
  store.record_log(entry.clone()).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(entry)))
}
