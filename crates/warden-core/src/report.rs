//! Snapshot filtering and dashboard aggregation.
//!
//! Every helper here is a pure function over a collection read once from
//! the store — no I/O, no locking, safe to call repeatedly.

use chrono::{DateTime, Duration, Utc};

use crate::{
  alert::{AlertStatus, SecurityAlert, Severity},
  cell::Cell,
  person::{Employee, Prisoner, Visitor},
  task::Task,
  visit::Visit,
};

// ─── Status labels ───────────────────────────────────────────────────────────

/// The human-readable status label an entity shows in table views.
pub trait StatusLabel {
  fn status_label(&self) -> &'static str;
}

impl StatusLabel for SecurityAlert {
  fn status_label(&self) -> &'static str { self.status().as_str() }
}

impl StatusLabel for Task {
  fn status_label(&self) -> &'static str { self.status().as_str() }
}

impl StatusLabel for Visit {
  fn status_label(&self) -> &'static str { self.status().as_str() }
}

impl StatusLabel for Prisoner {
  fn status_label(&self) -> &'static str { self.status().as_str() }
}

impl StatusLabel for Employee {
  fn status_label(&self) -> &'static str { self.status().as_str() }
}

impl StatusLabel for Visitor {
  fn status_label(&self) -> &'static str { self.status().as_str() }
}

impl StatusLabel for Cell {
  fn status_label(&self) -> &'static str { self.status().as_str() }
}

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Case-insensitive exact match on the status label, order-preserving.
pub fn filter_by_status<'a, T: StatusLabel>(
  items: &'a [T],
  status: &str,
) -> Vec<&'a T> {
  items
    .iter()
    .filter(|item| item.status_label().eq_ignore_ascii_case(status))
    .collect()
}

/// Keep items whose timestamp is within the last `hours_back` hours.
/// `hours_back == 0` is the "no filtering" sentinel and returns everything.
pub fn filter_by_time_window<'a, T>(
  items: &'a [T],
  timestamp: impl Fn(&T) -> DateTime<Utc>,
  hours_back: u32,
  now: DateTime<Utc>,
) -> Vec<&'a T> {
  if hours_back == 0 {
    return items.iter().collect();
  }
  let cutoff = now - Duration::hours(i64::from(hours_back));
  items.iter().filter(|item| timestamp(item) >= cutoff).collect()
}

/// Count items matching a predicate; used for dashboard tallies.
pub fn count_where<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> usize {
  items.iter().filter(|item| predicate(item)).count()
}

// ─── Health score ────────────────────────────────────────────────────────────

/// Tiered facility health score in `[0, 1]`, computed from Active alerts
/// only — acknowledged and resolved alerts never affect it.
///
/// Any Active Critical alert → 0.3; more than 5 Active alerts → 0.5;
/// otherwise 0.95.
pub fn compute_health_score(alerts: &[SecurityAlert]) -> f64 {
  let active: Vec<&SecurityAlert> = alerts
    .iter()
    .filter(|a| a.status() == AlertStatus::Active)
    .collect();

  if active.iter().any(|a| a.severity() == Severity::Critical) {
    return 0.3;
  }
  if active.len() > 5 {
    return 0.5;
  }
  0.95
}
