//! Scheduled visits between a prisoner and a registered visitor.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, identity::require_non_empty};

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
  Scheduled,
  InProgress,
  Completed,
  Cancelled,
}

impl VisitStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Scheduled => "Scheduled",
      Self::InProgress => "In Progress",
      Self::Completed => "Completed",
      Self::Cancelled => "Cancelled",
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Completed | Self::Cancelled)
  }
}

// ─── Visit ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
  id:               String,
  prisoner_id:      String,
  visitor_id:       String,
  scheduled_at:     DateTime<Utc>,
  duration_minutes: u32,
  created_at:       DateTime<Utc>,
  status:           VisitStatus,
  started_at:       Option<DateTime<Utc>>,
  completed_at:     Option<DateTime<Utc>>,
  cancelled_at:     Option<DateTime<Utc>>,
}

impl Visit {
  /// Schedule a visit. The duration must be positive.
  pub fn new(
    id: impl Into<String>,
    prisoner_id: impl Into<String>,
    visitor_id: impl Into<String>,
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    created_at: DateTime<Utc>,
  ) -> Result<Self> {
    let id = id.into();
    let prisoner_id = prisoner_id.into();
    let visitor_id = visitor_id.into();
    require_non_empty("id", &id)?;
    require_non_empty("prisoner_id", &prisoner_id)?;
    require_non_empty("visitor_id", &visitor_id)?;
    if duration_minutes == 0 {
      return Err(Error::Validation {
        field:  "duration_minutes",
        reason: "must be positive".into(),
      });
    }
    Ok(Self {
      id,
      prisoner_id,
      visitor_id,
      scheduled_at,
      duration_minutes,
      created_at,
      status: VisitStatus::Scheduled,
      started_at: None,
      completed_at: None,
      cancelled_at: None,
    })
  }

  /// Reassemble a visit from persisted fields. For storage backends.
  #[allow(clippy::too_many_arguments)]
  pub fn restore(
    id: String,
    prisoner_id: String,
    visitor_id: String,
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    created_at: DateTime<Utc>,
    status: VisitStatus,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
  ) -> Self {
    Self {
      id,
      prisoner_id,
      visitor_id,
      scheduled_at,
      duration_minutes,
      created_at,
      status,
      started_at,
      completed_at,
      cancelled_at,
    }
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// The visitor has arrived. Requires Scheduled.
  pub fn begin(&mut self, at: DateTime<Utc>) -> Result<()> {
    if self.status != VisitStatus::Scheduled {
      return Err(self.bad_transition("begin"));
    }
    self.status = VisitStatus::InProgress;
    self.started_at = Some(at);
    Ok(())
  }

  /// Close the visit out. Requires Scheduled or In Progress.
  pub fn complete(&mut self, at: DateTime<Utc>) -> Result<()> {
    if self.status.is_terminal() {
      return Err(self.bad_transition("complete"));
    }
    self.status = VisitStatus::Completed;
    self.completed_at = Some(at);
    Ok(())
  }

  /// Call the visit off. Requires Scheduled or In Progress.
  pub fn cancel(&mut self, at: DateTime<Utc>) -> Result<()> {
    if self.status.is_terminal() {
      return Err(self.bad_transition("cancel"));
    }
    self.status = VisitStatus::Cancelled;
    self.cancelled_at = Some(at);
    Ok(())
  }

  fn bad_transition(&self, action: &'static str) -> Error {
    Error::InvalidTransition {
      entity: "visit",
      id:     self.id.clone(),
      action,
      status: self.status.as_str(),
    }
  }

  // ── Derived ───────────────────────────────────────────────────────────────

  /// A visit is overdue while it is still Scheduled past its start time.
  /// Beginning, completing, or cancelling it clears the condition even
  /// though the scheduled time stays in the past.
  pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
    self.status == VisitStatus::Scheduled && self.scheduled_at < now
  }

  pub fn ends_at(&self) -> DateTime<Utc> {
    self.scheduled_at + Duration::minutes(i64::from(self.duration_minutes))
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn id(&self) -> &str { &self.id }

  pub fn prisoner_id(&self) -> &str { &self.prisoner_id }

  pub fn visitor_id(&self) -> &str { &self.visitor_id }

  pub fn scheduled_at(&self) -> DateTime<Utc> { self.scheduled_at }

  pub fn duration_minutes(&self) -> u32 { self.duration_minutes }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn status(&self) -> VisitStatus { self.status }

  pub fn started_at(&self) -> Option<DateTime<Utc>> { self.started_at }

  pub fn completed_at(&self) -> Option<DateTime<Utc>> { self.completed_at }

  pub fn cancelled_at(&self) -> Option<DateTime<Utc>> { self.cancelled_at }
}
