//! Handler tests for the occupancy paths, driven against an in-memory
//! SQLite store.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::Utc;
use warden_core::{
  cell::Cell,
  identity::Identity,
  person::{Prisoner, PrisonerStatus},
  store::FacilityStore,
};
use warden_store_sqlite::SqliteStore;

use crate::{cells, prisoners};

async fn seeded_store() -> Arc<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let identity = Identity::new("p-1", "John Doe", None).unwrap();
  store.add_prisoner(Prisoner::new(identity, Utc::now())).await.unwrap();
  store
    .add_cell(Cell::new("c-1", Some("B".into()), 2).unwrap())
    .await
    .unwrap();
  Arc::new(store)
}

#[tokio::test]
async fn releasing_a_prisoner_vacates_the_cell_slot() {
  let store = seeded_store().await;

  cells::assign(
    State(store.clone()),
    Path("c-1".into()),
    Json(cells::OccupantBody { prisoner_id: "p-1".into() }),
  )
  .await
  .unwrap();

  prisoners::release(
    State(store.clone()),
    Path("p-1".into()),
    Json(prisoners::ReleaseBody { by: "warden-1".into() }),
  )
  .await
  .unwrap();

  let cell = store.get_cell("c-1").await.unwrap().unwrap();
  assert!(cell.occupants().is_empty());
  let prisoner = store.get_prisoner("p-1").await.unwrap().unwrap();
  assert_eq!(prisoner.status(), PrisonerStatus::Released);
  assert!(prisoner.cell_id().is_none());
}

#[tokio::test]
async fn stale_occupant_can_be_removed_from_the_cell() {
  // A cell listing a prisoner whose own assignment is already clear —
  // legacy data. The remove route cleans up the cell side.
  let store = seeded_store().await;
  let mut cell = store.get_cell("c-1").await.unwrap().unwrap();
  cell.assign("p-1").unwrap();
  store.update_cell(cell).await.unwrap();
  let mut prisoner = store.get_prisoner("p-1").await.unwrap().unwrap();
  prisoner.release("warden-1", Utc::now()).unwrap();
  store.update_prisoner(prisoner).await.unwrap();

  cells::remove(
    State(store.clone()),
    Path("c-1".into()),
    Json(cells::OccupantBody { prisoner_id: "p-1".into() }),
  )
  .await
  .unwrap();

  let cell = store.get_cell("c-1").await.unwrap().unwrap();
  assert!(cell.occupants().is_empty());
}
