//! Work tasks assigned to staff.
//!
//! Lifecycle: Pending → In Progress → Completed, with Cancelled reachable
//! from either non-terminal state. Completed and Cancelled are terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  identity::{Stamp, require_non_empty},
};

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  Pending,
  InProgress,
  Completed,
  Cancelled,
}

impl TaskStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Pending => "Pending",
      Self::InProgress => "In Progress",
      Self::Completed => "Completed",
      Self::Cancelled => "Cancelled",
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Completed | Self::Cancelled)
  }
}

// ─── Task ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
  id:           String,
  description:  String,
  assigned_to:  String,
  created_at:   DateTime<Utc>,
  due_at:       Option<DateTime<Utc>>,
  status:       TaskStatus,
  started_at:   Option<DateTime<Utc>>,
  completed:    Option<Stamp>,
  cancelled_at: Option<DateTime<Utc>>,
}

impl Task {
  /// Create a new task. Starts Pending.
  pub fn new(
    id: impl Into<String>,
    description: impl Into<String>,
    assigned_to: impl Into<String>,
    due_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
  ) -> Result<Self> {
    let id = id.into();
    let description = description.into();
    let assigned_to = assigned_to.into();
    require_non_empty("id", &id)?;
    require_non_empty("description", &description)?;
    require_non_empty("assigned_to", &assigned_to)?;
    Ok(Self {
      id,
      description,
      assigned_to,
      created_at,
      due_at,
      status: TaskStatus::Pending,
      started_at: None,
      completed: None,
      cancelled_at: None,
    })
  }

  /// Reassemble a task from persisted fields. For storage backends.
  #[allow(clippy::too_many_arguments)]
  pub fn restore(
    id: String,
    description: String,
    assigned_to: String,
    created_at: DateTime<Utc>,
    due_at: Option<DateTime<Utc>>,
    status: TaskStatus,
    started_at: Option<DateTime<Utc>>,
    completed: Option<Stamp>,
    cancelled_at: Option<DateTime<Utc>>,
  ) -> Self {
    Self {
      id,
      description,
      assigned_to,
      created_at,
      due_at,
      status,
      started_at,
      completed,
      cancelled_at,
    }
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Begin work. Requires Pending.
  pub fn start(&mut self, at: DateTime<Utc>) -> Result<()> {
    if self.status != TaskStatus::Pending {
      return Err(self.bad_transition("start"));
    }
    self.status = TaskStatus::InProgress;
    self.started_at = Some(at);
    Ok(())
  }

  /// Finish the task. Requires Pending or In Progress.
  pub fn complete(&mut self, by: &str, at: DateTime<Utc>) -> Result<()> {
    if self.status.is_terminal() {
      return Err(self.bad_transition("complete"));
    }
    self.status = TaskStatus::Completed;
    self.completed = Some(Stamp::new(by, at));
    Ok(())
  }

  /// Drop the task without completing it. Requires Pending or In Progress.
  pub fn cancel(&mut self, at: DateTime<Utc>) -> Result<()> {
    if self.status.is_terminal() {
      return Err(self.bad_transition("cancel"));
    }
    self.status = TaskStatus::Cancelled;
    self.cancelled_at = Some(at);
    Ok(())
  }

  fn bad_transition(&self, action: &'static str) -> Error {
    Error::InvalidTransition {
      entity: "task",
      id:     self.id.clone(),
      action,
      status: self.status.as_str(),
    }
  }

  // ── Derived ───────────────────────────────────────────────────────────────

  /// A task is overdue while its due time is in the past and it has not
  /// reached a terminal state.
  pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
    !self.status.is_terminal() && self.due_at.is_some_and(|due| due < now)
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn id(&self) -> &str { &self.id }

  pub fn description(&self) -> &str { &self.description }

  pub fn assigned_to(&self) -> &str { &self.assigned_to }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn due_at(&self) -> Option<DateTime<Utc>> { self.due_at }

  pub fn status(&self) -> TaskStatus { self.status }

  pub fn started_at(&self) -> Option<DateTime<Utc>> { self.started_at }

  pub fn completed(&self) -> Option<&Stamp> { self.completed.as_ref() }

  pub fn cancelled_at(&self) -> Option<DateTime<Utc>> { self.cancelled_at }
}
