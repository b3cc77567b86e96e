//! Handlers for `/grants` endpoints.
//!
//! Grant responses carry the derived effective status and level, computed
//! against the current date. Grant IDs are minted server-side.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warden_core::{
  access::{AccessGrant, GrantStatus, PermissionLevel},
  store::FacilityStore,
};

use crate::error::{ApiError, store_err};

/// A grant plus its derived view for today.
#[derive(Debug, Serialize)]
pub struct GrantView {
  #[serde(flatten)]
  pub grant:            AccessGrant,
  pub effective_status: GrantStatus,
  pub effective_level:  PermissionLevel,
}

impl GrantView {
  fn new(grant: AccessGrant, today: NaiveDate) -> Self {
    let effective_status = grant.effective_status(today);
    let effective_level = grant.effective_level(today);
    Self { grant, effective_status, effective_level }
  }
}

fn today() -> NaiveDate { Utc::now().date_naive() }

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// If set, restrict to grants held by this person.
  pub holder_id: Option<String>,
}

/// `GET /grants[?holder_id=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<GrantView>>, ApiError>
where
  S: FacilityStore,
{
  let grants = match &params.holder_id {
    Some(holder_id) => {
      store.list_grants_for_holder(holder_id).await.map_err(store_err)?
    }
    None => store.list_grants().await.map_err(store_err)?,
  };
  let today = today();
  Ok(Json(grants.into_iter().map(|g| GrantView::new(g, today)).collect()))
}

/// `GET /grants/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<GrantView>, ApiError>
where
  S: FacilityStore,
{
  let grant = store
    .get_grant(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("grant {id} not found")))?;
  Ok(Json(GrantView::new(grant, today())))
}

/// JSON body accepted by `POST /grants`.
#[derive(Debug, Deserialize)]
pub struct NewGrantBody {
  pub holder_id:  String,
  pub area:       String,
  pub level:      PermissionLevel,
  /// Badge number of the granting employee.
  pub granted_by: String,
  /// `None` means the grant is permanent.
  pub expires_on: Option<NaiveDate>,
}

/// `POST /grants` — returns 201 + the stored grant.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewGrantBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
{
  let grant = AccessGrant::new(
    Uuid::new_v4().to_string(),
    body.holder_id,
    body.area,
    body.level,
    body.granted_by,
    body.expires_on,
    Utc::now(),
  )?;
  store.add_grant(grant.clone()).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(GrantView::new(grant, today()))))
}

#[derive(Debug, Deserialize)]
pub struct RevokeBody {
  /// Who withdrew the grant.
  pub by: String,
}

/// `POST /grants/:id/revoke` — guarded; an already-revoked grant is 409.
/// An expired grant can still be revoked.
pub async fn revoke<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<RevokeBody>,
) -> Result<Json<GrantView>, ApiError>
where
  S: FacilityStore,
{
  let mut grant = store
    .get_grant(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("grant {id} not found")))?;
  grant.revoke(&body.by, Utc::now())?;
  store.update_grant(grant.clone()).await.map_err(store_err)?;
  Ok(Json(GrantView::new(grant, today())))
}
