//! Handlers for `/cells` endpoints.
//!
//! Cell responses carry the derived occupancy status alongside the stored
//! fields. Assigning and removing occupants updates both sides of the
//! relationship — the cell's occupant list and the prisoner's `cell_id` —
//! persisted in one atomic write.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use warden_core::{
  cell::{Cell, CellStatus},
  report::filter_by_status,
  store::FacilityStore,
};

use crate::error::{ApiError, store_err};

/// A cell plus its derived status.
#[derive(Debug, Serialize)]
pub struct CellView {
  #[serde(flatten)]
  pub cell:   Cell,
  pub status: CellStatus,
}

impl From<Cell> for CellView {
  fn from(cell: Cell) -> Self {
    let status = cell.status();
    Self { cell, status }
  }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<String>,
}

/// `GET /cells[?status=vacant]` — the filter matches the derived status.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<CellView>>, ApiError>
where
  S: FacilityStore,
{
  let cells = store.list_cells().await.map_err(store_err)?;
  let cells: Vec<Cell> = match &params.status {
    Some(status) => {
      filter_by_status(&cells, status).into_iter().cloned().collect()
    }
    None => cells,
  };
  Ok(Json(cells.into_iter().map(CellView::from).collect()))
}

/// `GET /cells/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<CellView>, ApiError>
where
  S: FacilityStore,
{
  let cell = store
    .get_cell(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("cell {id} not found")))?;
  Ok(Json(CellView::from(cell)))
}

/// JSON body accepted by `POST /cells`. The cell label is the
/// caller-supplied `id`.
#[derive(Debug, Deserialize)]
pub struct NewCellBody {
  pub id:       String,
  pub block:    Option<String>,
  pub capacity: u32,
}

/// `POST /cells` — returns 201 + the stored cell.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewCellBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
{
  let cell = Cell::new(body.id, body.block, body.capacity)?;
  store.add_cell(cell.clone()).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(CellView::from(cell))))
}

#[derive(Debug, Deserialize)]
pub struct OccupantBody {
  pub prisoner_id: String,
}

/// `POST /cells/:id/assign` — puts a prisoner in the cell.
///
/// 409 on a full or maintenance cell or a duplicate occupant; the prisoner
/// must be In Custody.
pub async fn assign<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<OccupantBody>,
) -> Result<Json<CellView>, ApiError>
where
  S: FacilityStore,
{
  let mut cell = store
    .get_cell(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("cell {id} not found")))?;
  let mut prisoner = store
    .get_prisoner(&body.prisoner_id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("prisoner {} not found", body.prisoner_id))
    })?;

  cell.assign(&body.prisoner_id)?;
  prisoner.move_to_cell(cell.id())?;

  store
    .update_cell_and_prisoner(cell.clone(), prisoner)
    .await
    .map_err(store_err)?;
  Ok(Json(CellView::from(cell)))
}

/// `POST /cells/:id/remove` — takes a prisoner out of the cell.
///
/// Allowed while the cell is under maintenance; 409 if the prisoner is not
/// an occupant. An occupant whose own assignment is already clear (legacy
/// data) is removed from the cell side only.
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<OccupantBody>,
) -> Result<Json<CellView>, ApiError>
where
  S: FacilityStore,
{
  let mut cell = store
    .get_cell(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("cell {id} not found")))?;
  let mut prisoner = store
    .get_prisoner(&body.prisoner_id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("prisoner {} not found", body.prisoner_id))
    })?;

  cell.remove(&body.prisoner_id)?;

  if prisoner.cell_id() == Some(cell.id()) {
    prisoner.remove_from_cell()?;
    store
      .update_cell_and_prisoner(cell.clone(), prisoner)
      .await
      .map_err(store_err)?;
  } else {
    store.update_cell(cell.clone()).await.map_err(store_err)?;
  }
  Ok(Json(CellView::from(cell)))
}

#[derive(Debug, Deserialize)]
pub struct MaintenanceBody {
  /// `true` to begin maintenance, `false` to end it.
  pub active: bool,
}

/// `POST /cells/:id/maintenance` — toggles the maintenance flag.
///
/// Maintenance may begin regardless of occupancy; occupants can still be
/// removed while it is active.
pub async fn maintenance<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<MaintenanceBody>,
) -> Result<Json<CellView>, ApiError>
where
  S: FacilityStore,
{
  let mut cell = store
    .get_cell(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("cell {id} not found")))?;
  if body.active {
    cell.begin_maintenance();
  } else {
    cell.end_maintenance();
  }
  store.update_cell(cell.clone()).await.map_err(store_err)?;
  Ok(Json(CellView::from(cell)))
}
