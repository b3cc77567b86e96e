//! JSON REST API for Warden.
//!
//! Exposes an axum [`Router`] backed by any
//! [`warden_core::store::FacilityStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", warden_api::api_router(store.clone()))
//! ```

pub mod alerts;
pub mod cells;
pub mod dashboard;
pub mod employees;
pub mod error;
pub mod grants;
pub mod logs;
pub mod prisoners;
pub mod tasks;
pub mod visitors;
pub mod visits;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use warden_core::store::FacilityStore;

pub use error::ApiError;

#[cfg(test)]
mod tests;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FacilityStore + 'static,
{
  Router::new()
    // Prisoners
    .route(
      "/prisoners",
      get(prisoners::list::<S>).post(prisoners::create::<S>),
    )
    .route("/prisoners/{id}", get(prisoners::get_one::<S>))
    .route("/prisoners/{id}/release", post(prisoners::release::<S>))
    // Employees
    .route(
      "/employees",
      get(employees::list::<S>).post(employees::create::<S>),
    )
    .route("/employees/{id}", get(employees::get_one::<S>))
    .route("/employees/{id}/promote", post(employees::promote::<S>))
    .route("/employees/{id}/deactivate", post(employees::deactivate::<S>))
    // Visitors
    .route(
      "/visitors",
      get(visitors::list::<S>).post(visitors::create::<S>),
    )
    .route("/visitors/{id}", get(visitors::get_one::<S>))
    .route("/visitors/{id}/ban", post(visitors::ban::<S>))
    // Cells
    .route("/cells", get(cells::list::<S>).post(cells::create::<S>))
    .route("/cells/{id}", get(cells::get_one::<S>))
    .route("/cells/{id}/assign", post(cells::assign::<S>))
    .route("/cells/{id}/remove", post(cells::remove::<S>))
    .route("/cells/{id}/maintenance", post(cells::maintenance::<S>))
    // Visits
    .route("/visits", get(visits::list::<S>).post(visits::create::<S>))
    .route("/visits/{id}", get(visits::get_one::<S>))
    .route("/visits/{id}/begin", post(visits::begin::<S>))
    .route("/visits/{id}/complete", post(visits::complete::<S>))
    .route("/visits/{id}/cancel", post(visits::cancel::<S>))
    // Tasks
    .route("/tasks", get(tasks::list::<S>).post(tasks::create::<S>))
    .route("/tasks/{id}", get(tasks::get_one::<S>))
    .route("/tasks/{id}/start", post(tasks::start::<S>))
    .route("/tasks/{id}/complete", post(tasks::complete::<S>))
    .route("/tasks/{id}/cancel", post(tasks::cancel::<S>))
    // Alerts
    .route("/alerts", get(alerts::list::<S>).post(alerts::create::<S>))
    .route("/alerts/{id}", get(alerts::get_one::<S>))
    .route("/alerts/{id}/acknowledge", post(alerts::acknowledge::<S>))
    .route("/alerts/{id}/resolve", post(alerts::resolve::<S>))
    // Logs — append-only
    .route("/logs", get(logs::list::<S>).post(logs::create::<S>))
    // Access grants
    .route("/grants", get(grants::list::<S>).post(grants::create::<S>))
    .route("/grants/{id}", get(grants::get_one::<S>))
    .route("/grants/{id}/revoke", post(grants::revoke::<S>))
    // Dashboard
    .route("/dashboard", get(dashboard::handler::<S>))
    .with_state(store)
}
