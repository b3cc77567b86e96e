//! Handlers for `/prisoners` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/prisoners` | Optional `?status=` filter (case-insensitive) |
//! | `GET`  | `/prisoners/:id` | Single prisoner |
//! | `POST` | `/prisoners` | Body: [`NewPrisonerBody`]; returns 201 |
//! | `POST` | `/prisoners/:id/release` | Body: `{"by":"..."}` |

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
  person::Prisoner,
  report::filter_by_status,
  store::FacilityStore,
};

use crate::error::{ApiError, store_err};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<String>,
}

/// `GET /prisoners[?status=in_custody]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Prisoner>>, ApiError>
where
  S: FacilityStore,
{
  let prisoners = store.list_prisoners().await.map_err(store_err)?;
  let prisoners = match &params.status {
    Some(status) => {
      filter_by_status(&prisoners, status).into_iter().cloned().collect()
    }
    None => prisoners,
  };
  Ok(Json(prisoners))
}

/// `GET /prisoners/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Prisoner>, ApiError>
where
  S: FacilityStore,
{
  let prisoner = store
    .get_prisoner(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("prisoner {id} not found")))?;
  Ok(Json(prisoner))
}

/// JSON body accepted by `POST /prisoners`. The booking number is the
/// caller-supplied `id`.
#[derive(Debug, Deserialize)]
pub struct NewPrisonerBody {
  pub id:          String,
  pub name:        String,
  pub phone:       Option<String>,
  /// Defaults to the time of the request.
  pub admitted_at: Option<DateTime<Utc>>,
}

/// `POST /prisoners` — returns 201 + the stored prisoner.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPrisonerBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
{
  let identity = Identity::new(body.id, body.name, body.phone)?;
  let admitted_at = body.admitted_at.unwrap_or_else(Utc::now);
  let prisoner = Prisoner::new(identity, admitted_at);
  store.add_prisoner(prisoner.clone()).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(prisoner)))
}

#[derive(Debug, Deserialize)]
pub struct ReleaseBody {
  /// Who authorised the release.
  pub by: String,
}

/// `POST /prisoners/:id/release` — guarded; 409 if not In Custody.
///
/// A release also vacates the prisoner's cell slot; the cell and prisoner
/// rows are persisted in one atomic write.
pub async fn release<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<ReleaseBody>,
) -> Result<Json<Prisoner>, ApiError>
where
  S: FacilityStore,
{
  let mut prisoner = store
    .get_prisoner(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("prisoner {id} not found")))?;
  let cell = match prisoner.cell_id() {
    Some(cell_id) => store.get_cell(cell_id).await.map_err(store_err)?,
    None => None,
  };
  prisoner.release(&body.by, Utc::now())?;

  match cell.map(|mut cell| (cell.remove(&id).is_ok(), cell)) {
    Some((true, cell)) => store
      .update_cell_and_prisoner(cell, prisoner.clone())
      .await
      .map_err(store_err)?,
    // No assigned cell, or the cell does not list the prisoner anyway.
    _ => store.update_prisoner(prisoner.clone()).await.map_err(store_err)?,
  }
  Ok(Json(prisoner))
}
