//! `GET /dashboard` — facility-wide aggregation over store snapshots.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use warden_core::{
  alert::AlertStatus,
  cell::CellStatus,
  log::SecurityLog,
  person::PrisonerStatus,
  report::{compute_health_score, count_where, filter_by_time_window},
  store::FacilityStore,
};

use crate::error::{ApiError, store_err};

/// One-screen facility summary.
#[derive(Debug, Serialize)]
pub struct Dashboard {
  pub in_custody:        usize,
  pub active_alerts:     usize,
  /// Critical log entries recorded in the last 24 hours.
  pub critical_logs_24h: usize,
  pub overdue_tasks:     usize,
  pub overdue_visits:    usize,
  pub cells_at_capacity: usize,
  pub health_score:      f64,
}

/// `GET /dashboard`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: FacilityStore,
{
  let now = Utc::now();

  let prisoners = store.list_prisoners().await.map_err(store_err)?;
  let alerts = store.list_alerts().await.map_err(store_err)?;
  let logs = store.list_logs().await.map_err(store_err)?;
  let tasks = store.list_tasks().await.map_err(store_err)?;
  let visits = store.list_visits().await.map_err(store_err)?;
  let cells = store.list_cells().await.map_err(store_err)?;

  let recent_logs =
    filter_by_time_window(&logs, SecurityLog::logged_at, 24, now);

  Ok(Json(Dashboard {
    in_custody:        count_where(&prisoners, |p| {
      p.status() == PrisonerStatus::InCustody
    }),
    active_alerts:     count_where(&alerts, |a| {
      a.status() == AlertStatus::Active
    }),
    critical_logs_24h: recent_logs.iter().filter(|l| l.is_critical()).count(),
    overdue_tasks:     count_where(&tasks, |t| t.is_overdue(now)),
    overdue_visits:    count_where(&visits, |v| v.is_overdue(now)),
    cells_at_capacity: count_where(&cells, |c| {
      c.status() == CellStatus::Full
    }),
    health_score:      compute_health_score(&alerts),
  }))
}
