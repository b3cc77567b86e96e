//! Handlers for `/employees` endpoints.

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
  person::Employee,
  report::filter_by_status,
  store::FacilityStore,
};

use crate::error::{ApiError, store_err};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<String>,
}

/// `GET /employees[?status=active]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Employee>>, ApiError>
where
  S: FacilityStore,
{
  let employees = store.list_employees().await.map_err(store_err)?;
  let employees = match &params.status {
    Some(status) => {
      filter_by_status(&employees, status).into_iter().cloned().collect()
    }
    None => employees,
  };
  Ok(Json(employees))
}

/// `GET /employees/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError>
where
  S: FacilityStore,
{
  let employee = store
    .get_employee(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;
  Ok(Json(employee))
}

/// JSON body accepted by `POST /employees`. The badge number is the
/// caller-supplied `id`.
#[derive(Debug, Deserialize)]
pub struct NewEmployeeBody {
  pub id:         String,
  pub name:       String,
  pub phone:      Option<String>,
  pub title:      String,
  pub department: Option<String>,
  /// Defaults to the time of the request.
  pub hired_at:   Option<DateTime<Utc>>,
}

/// `POST /employees` — returns 201 + the stored employee.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewEmployeeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
{
  let identity = Identity::new(body.id, body.name, body.phone)?;
  let hired_at = body.hired_at.unwrap_or_else(Utc::now);
  let employee =
    Employee::new(identity, body.title, body.department, hired_at)?;
  store.add_employee(employee.clone()).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(employee)))
}

#[derive(Debug, Deserialize)]
pub struct PromoteBody {
  pub title: String,
}

/// `POST /employees/:id/promote` — guarded; 409 if Inactive.
pub async fn promote<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<PromoteBody>,
) -> Result<Json<Employee>, ApiError>
where
  S: FacilityStore,
{
  let mut employee = store
    .get_employee(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;
  employee.promote(body.title)?;
  store.update_employee(employee.clone()).await.map_err(store_err)?;
  Ok(Json(employee))
}

/// `POST /employees/:id/deactivate` — guarded; Inactive is terminal.
pub async fn deactivate<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError>
where
  S: FacilityStore,
{
  let mut employee = store
    .get_employee(&id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;
  employee.deactivate(Utc::now())?;
  store.update_employee(employee.clone()).await.map_err(store_err)?;
  Ok(Json(employee))
}
