//! Handlers for `/visitors` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use warden_core::{
  identity::Identity,
  person::Visitor,
  report::filter_by_status,
  store::FacilityStore,
};

use crate::error::{ApiError, store_err};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<String>,
}

/// `GET /visitors[?status=approved]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Visitor>>, ApiError>
where
  S: FacilityStore,
{
  let visitors = store.list_visitors().await.map_err(store_err)?;
  let visitors = match &params.status {
    Some(status) => {
      filter_by_status(&visitors, status).into_iter().cloned().collect()
    }
    None => visitors,
  };
  Ok(Json(visitors))
}

/// `GET /visitors/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Visitor>, ApiError>
where
  S: FacilityStore,
{
  let visitor = store
    .get_visitor(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("visitor {id} not found")))?;
  Ok(Json(visitor))
}

/// JSON body accepted by `POST /visitors`.
#[derive(Debug, Deserialize)]
pub struct NewVisitorBody {
  pub id:            String,
  pub name:          String,
  pub phone:         Option<String>,
  pub relationship:  Option<String>,
  /// Defaults to the time of the request.
  pub registered_at: Option<DateTime<Utc>>,
}

/// `POST /visitors` — returns 201 + the stored visitor.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewVisitorBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
{
  let identity = Identity::new(body.id, body.name, body.phone)?;
  let registered_at = body.registered_at.unwrap_or_else(Utc::now);
  let visitor = Visitor::new(identity, body.relationship, registered_at);
  store.add_visitor(visitor.clone()).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(visitor)))
}

#[derive(Debug, Deserialize)]
pub struct BanBody {
  /// Who imposed the ban.
  pub by:     String,
  pub reason: Option<String>,
}

/// `POST /visitors/:id/ban` — guarded; Banned is terminal.
pub async fn ban<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<BanBody>,
) -> Result<Json<Visitor>, ApiError>
where
  S: FacilityStore,
{
  let mut visitor = store
    .get_visitor(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("visitor {id} not found")))?;
  visitor.ban(&body.by, body.reason, Utc::now())?;
  store.update_visitor(visitor.clone()).await.map_err(store_err)?;
  Ok(Json(visitor))
}
