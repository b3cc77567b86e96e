//! Handlers for `/visits` endpoints.
//!
//! Visit IDs are minted server-side (UUID v4). Creating a visit checks that
//! the referenced prisoner and visitor exist and that the visitor is not
//! banned.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use warden_core::{
  person::VisitorStatus,
  report::filter_by_status,
  store::FacilityStore,
  visit::Visit,
};

use crate::error::{ApiError, store_err};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// If set, restrict to this prisoner's visits.
  pub prisoner_id: Option<String>,
  pub status:      Option<String>,
}

/// `GET /visits[?prisoner_id=...][&status=scheduled]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Visit>>, ApiError>
where
  S: FacilityStore,
{
  let visits = match &params.prisoner_id {
    Some(prisoner_id) => store
      .list_visits_for_prisoner(prisoner_id)
      .await
      .map_err(store_err)?,
    None => store.list_visits().await.map_err(store_err)?,
  };
  let visits = match &params.status {
    Some(status) => {
      filter_by_status(&visits, status).into_iter().cloned().collect()
    }
    None => visits,
  };
  Ok(Json(visits))
}

/// `GET /visits/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Visit>, ApiError>
where
  S: FacilityStore,
{
  let visit = store
    .get_visit(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("visit {id} not found")))?;
  Ok(Json(visit))
}

/// JSON body accepted by `POST /visits`.
#[derive(Debug, Deserialize)]
pub struct NewVisitBody {
  pub prisoner_id:      String,
  pub visitor_id:       String,
  pub scheduled_at:     DateTime<Utc>,
  pub duration_minutes: u32,
}

/// `POST /visits` — returns 201 + the stored visit.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewVisitBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
{
  store
    .get_prisoner(&body.prisoner_id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("prisoner {} not found", body.prisoner_id))
    })?;
  let visitor = store
    .get_visitor(&body.visitor_id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("visitor {} not found", body.visitor_id))
    })?;
  if visitor.status() == VisitorStatus::Banned {
    return Err(ApiError::Domain(warden_core::Error::InvalidTransition {
      entity: "visit",
      id:     visitor.id().to_owned(),
      action: "schedule",
      status: visitor.status().as_str(),
    }));
  }

  let visit = Visit::new(
    Uuid::new_v4().to_string(),
    body.prisoner_id,
    body.visitor_id,
    body.scheduled_at,
    body.duration_minutes,
    Utc::now(),
  )?;
  store.add_visit(visit.clone()).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(visit)))
}

/// `POST /visits/:id/begin` — guarded; only a Scheduled visit can begin.
pub async fn begin<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Visit>, ApiError>
where
  S: FacilityStore,
{
  let mut visit = store
    .get_visit(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("visit {id} not found")))?;
  visit.begin(Utc::now())?;
  store.update_visit(visit.clone()).await.map_err(store_err)?;
  Ok(Json(visit))
}

/// `POST /visits/:id/complete` — guarded; terminal states are 409.
pub async fn complete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Visit>, ApiError>
where
  S: FacilityStore,
{
  let mut visit = store
    .get_visit(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("visit {id} not found")))?;
  visit.complete(Utc::now())?;
  store.update_visit(visit.clone()).await.map_err(store_err)?;
  Ok(Json(visit))
}

/// `POST /visits/:id/cancel` — guarded; terminal states are 409.
pub async fn cancel<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Visit>, ApiError>
where
  S: FacilityStore,
{
  let mut visit = store
    .get_visit(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("visit {id} not found")))?;
  visit.cancel(Utc::now())?;
  store.update_visit(visit.clone()).await.map_err(store_err)?;
  Ok(Json(visit))
}
