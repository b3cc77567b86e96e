//! The `FacilityStore` trait.
//!
//! Implemented by storage backends (e.g. `warden-store-sqlite`). Higher
//! layers (`warden-api`, the server binary) depend on this abstraction, not
//! on any concrete backend.
//!
//! The persistence policy is confirm-then-apply: callers mutate an
//! in-memory copy through a guarded transition, persist it with the
//! matching `update_*` method, and only treat the transition as applied
//! once the update succeeds. A failed update leaves the stored record
//! untouched.

use std::future::Future;

use crate::{
  access::AccessGrant,
  alert::SecurityAlert,
  cell::Cell,
  log::SecurityLog,
  person::{Employee, Prisoner, Visitor},
  task::Task,
  visit::Visit,
};

/// Abstraction over a Warden records store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). `get_*` returns
/// `None` for an unknown ID; `update_*` on an unknown ID is an error.
pub trait FacilityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Prisoners ─────────────────────────────────────────────────────────

  fn add_prisoner(
    &self,
    prisoner: Prisoner,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_prisoner<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Prisoner>, Self::Error>> + Send + 'a;

  fn list_prisoners(
    &self,
  ) -> impl Future<Output = Result<Vec<Prisoner>, Self::Error>> + Send + '_;

  fn update_prisoner(
    &self,
    prisoner: Prisoner,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Employees ─────────────────────────────────────────────────────────

  fn add_employee(
    &self,
    employee: Employee,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_employee<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + 'a;

  fn list_employees(
    &self,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  fn update_employee(
    &self,
    employee: Employee,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Visitors ──────────────────────────────────────────────────────────

  fn add_visitor(
    &self,
    visitor: Visitor,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_visitor<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Visitor>, Self::Error>> + Send + 'a;

  fn list_visitors(
    &self,
  ) -> impl Future<Output = Result<Vec<Visitor>, Self::Error>> + Send + '_;

  fn update_visitor(
    &self,
    visitor: Visitor,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Cells ─────────────────────────────────────────────────────────────

  fn add_cell(
    &self,
    cell: Cell,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_cell<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Cell>, Self::Error>> + Send + 'a;

  fn list_cells(
    &self,
  ) -> impl Future<Output = Result<Vec<Cell>, Self::Error>> + Send + '_;

  fn update_cell(
    &self,
    cell: Cell,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist a cell and a prisoner in one atomic write.
  ///
  /// Occupancy operations touch both sides of the relationship; neither
  /// row may land without the other.
  fn update_cell_and_prisoner(
    &self,
    cell: Cell,
    prisoner: Prisoner,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Visits ────────────────────────────────────────────────────────────

  fn add_visit(
    &self,
    visit: Visit,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_visit<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Visit>, Self::Error>> + Send + 'a;

  fn list_visits(
    &self,
  ) -> impl Future<Output = Result<Vec<Visit>, Self::Error>> + Send + '_;

  /// All visits for one prisoner; served by the SQL layer directly.
  fn list_visits_for_prisoner<'a>(
    &'a self,
    prisoner_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Visit>, Self::Error>> + Send + 'a;

  fn update_visit(
    &self,
    visit: Visit,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Tasks ─────────────────────────────────────────────────────────────

  fn add_task(
    &self,
    task: Task,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_task<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Task>, Self::Error>> + Send + 'a;

  fn list_tasks(
    &self,
  ) -> impl Future<Output = Result<Vec<Task>, Self::Error>> + Send + '_;

  fn update_task(
    &self,
    task: Task,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Alerts ────────────────────────────────────────────────────────────

  fn add_alert(
    &self,
    alert: SecurityAlert,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_alert<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<SecurityAlert>, Self::Error>> + Send + 'a;

  fn list_alerts(
    &self,
  ) -> impl Future<Output = Result<Vec<SecurityAlert>, Self::Error>> + Send + '_;

  fn update_alert(
    &self,
    alert: SecurityAlert,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Logs — append-only ────────────────────────────────────────────────

  /// Record a log entry. Log rows are never updated afterwards.
  fn record_log(
    &self,
    entry: SecurityLog,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_logs(
    &self,
  ) -> impl Future<Output = Result<Vec<SecurityLog>, Self::Error>> + Send + '_;

  // ── Access grants ─────────────────────────────────────────────────────

  fn add_grant(
    &self,
    grant: AccessGrant,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_grant<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<AccessGrant>, Self::Error>> + Send + 'a;

  fn list_grants(
    &self,
  ) -> impl Future<Output = Result<Vec<AccessGrant>, Self::Error>> + Send + '_;

  /// All grants held by one person; served by the SQL layer directly.
  fn list_grants_for_holder<'a>(
    &'a self,
    holder_id: &'a str,
  ) -> impl Future<Output = Result<Vec<AccessGrant>, Self::Error>> + Send + 'a;

  fn update_grant(
    &self,
    grant: AccessGrant,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
