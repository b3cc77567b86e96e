//! Handlers for `/tasks` endpoints. Task IDs are minted server-side.

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
  report::filter_by_status,
  store::FacilityStore,
  task::Task,
};

use crate::error::{ApiError, store_err};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<String>,
}

/// `GET /tasks[?status=pending]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, ApiError>
where
  S: FacilityStore,
{
  let tasks = store.list_tasks().await.map_err(store_err)?;
  let tasks = match &params.status {
    Some(status) => {
      filter_by_status(&tasks, status).into_iter().cloned().collect()
    }
    None => tasks,
  };
  Ok(Json(tasks))
}

/// `GET /tasks/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Task>, ApiError>
where
  S: FacilityStore,
{
  let task = store
    .get_task(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
  Ok(Json(task))
}

/// JSON body accepted by `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct NewTaskBody {
  pub description: String,
  /// Badge number of the assignee.
  pub assigned_to: String,
  pub due_at:      Option<DateTime<Utc>>,
}

/// `POST /tasks` — returns 201 + the stored task.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewTaskBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
{
  let task = Task::new(
    Uuid::new_v4().to_string(),
    body.description,
    body.assigned_to,
    body.due_at,
    Utc::now(),
  )?;
  store.add_task(task.clone()).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(task)))
}

/// `POST /tasks/:id/start` — guarded; only a Pending task can start.
pub async fn start<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Task>, ApiError>
where
  S: FacilityStore,
{
  let mut task = store
    .get_task(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
  task.start(Utc::now())?;
  store.update_task(task.clone()).await.map_err(store_err)?;
  Ok(Json(task))
}

#[derive(Debug, Deserialize)]
pub struct CompleteBody {
  /// Who completed the task.
  pub by: String,
}

/// `POST /tasks/:id/complete` — guarded; terminal states are 409.
pub async fn complete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<CompleteBody>,
) -> Result<Json<Task>, ApiError>
where
  S: FacilityStore,
{
  let mut task = store
    .get_task(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
  task.complete(&body.by, Utc::now())?;
  store.update_task(task.clone()).await.map_err(store_err)?;
  Ok(Json(task))
}

/// `POST /tasks/:id/cancel` — guarded; terminal states are 409.
pub async fn cancel<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Task>, ApiError>
where
  S: FacilityStore,
{
  let mut task = store
    .get_task(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
  task.cancel(Utc::now())?;
  store.update_task(task.clone()).await.map_err(store_err)?;
  Ok(Json(task))
}
