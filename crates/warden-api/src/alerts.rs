//! Handlers for `/alerts` endpoints. Alert IDs are minted server-side.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use warden_core::{
  alert::{SecurityAlert, Severity},
  report::filter_by_status,
  store::FacilityStore,
};

use crate::error::{ApiError, store_err};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<String>,
}

/// `GET /alerts[?status=active]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<SecurityAlert>>, ApiError>
where
  S: FacilityStore,
{
  let alerts = store.list_alerts().await.map_err(store_err)?;
  let alerts = match &params.status {
    Some(status) => {
      filter_by_status(&alerts, status).into_iter().cloned().collect()
    }
    None => alerts,
  };
  Ok(Json(alerts))
}

/// `GET /alerts/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<SecurityAlert>, ApiError>
where
  S: FacilityStore,
{
  let alert = store
    .get_alert(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("alert {id} not found")))?;
  Ok(Json(alert))
}

/// JSON body accepted by `POST /alerts`.
#[derive(Debug, Deserialize)]
pub struct NewAlertBody {
  pub message:  String,
  pub severity: Severity,
  pub location: Option<String>,
}

/// `POST /alerts` — returns 201 + the stored alert (status Active).
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewAlertBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
{
  let alert = SecurityAlert::new(
    Uuid::new_v4().to_string(),
    body.message,
    body.severity,
    body.location,
    Utc::now(),
  )?;
  store.add_alert(alert.clone()).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(alert)))
}

#[derive(Debug, Deserialize)]
pub struct ActorBody {
  /// Badge number of the acting employee.
  pub by: String,
}

/// `POST /alerts/:id/acknowledge` — guarded; only an Active alert.
pub async fn acknowledge<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<ActorBody>,
) -> Result<Json<SecurityAlert>, ApiError>
where
  S: FacilityStore,
{
  let mut alert = store
    .get_alert(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("alert {id} not found")))?;
  alert.acknowledge(&body.by, Utc::now())?;
  store.update_alert(alert.clone()).await.map_err(store_err)?;
  Ok(Json(alert))
}

/// `POST /alerts/:id/resolve` — guarded; Resolved is terminal. An Active
/// alert may resolve directly without acknowledgement.
pub async fn resolve<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<ActorBody>,
) -> Result<Json<SecurityAlert>, ApiError>
where
  S: FacilityStore,
{
  let mut alert = store
    .get_alert(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("alert {id} not found")))?;
  alert.resolve(&body.by, Utc::now())?;
  store.update_alert(alert.clone()).await.map_err(store_err)?;
  Ok(Json(alert))
}
