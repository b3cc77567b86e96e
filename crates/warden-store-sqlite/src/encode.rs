//! Encoding and decoding helpers between Rust domain types and the plain
//! text representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; expiry dates are `YYYY-MM-DD`; cell
//! occupant lists are compact JSON arrays; enums are lowercase snake_case
//! discriminants. Transition stamps are (by, at) column pairs that are
//! either both set or both NULL.

use chrono::{DateTime, NaiveDate, Utc};
use warden_core::{
  access::{AccessGrant, PermissionLevel},
  alert::{AlertStatus, SecurityAlert, Severity},
  cell::Cell,
  identity::{Identity, Stamp},
  log::{LogLevel, SecurityLog},
  person::{
    Employee, EmployeeStatus, Prisoner, PrisonerStatus, Visitor,
    VisitorStatus,
  },
  task::{Task, TaskStatus},
  visit::{Visit, VisitStatus},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_opt_dt(dt: Option<DateTime<Utc>>) -> Option<String> {
  dt.map(encode_dt)
}

pub fn decode_opt_dt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

// ─── Expiry dates ────────────────────────────────────────────────────────────

pub fn encode_expiry(d: Option<NaiveDate>) -> Option<String> {
  d.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Fail-open: a malformed `expires_on` column decodes as "no expiry"
/// rather than an error. Retained policy from the source system.
pub fn decode_expiry(s: Option<&str>) -> Option<NaiveDate> {
  s.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

// ─── Stamps ──────────────────────────────────────────────────────────────────

pub fn encode_stamp(
  stamp: Option<&Stamp>,
) -> (Option<String>, Option<String>) {
  match stamp {
    Some(s) => (Some(s.by.clone()), Some(encode_dt(s.at))),
    None => (None, None),
  }
}

/// A stamp exists only when both columns are present.
pub fn decode_stamp(
  by: Option<String>,
  at: Option<&str>,
) -> Result<Option<Stamp>> {
  match (by, at) {
    (Some(by), Some(at)) => Ok(Some(Stamp { by, at: decode_dt(at)? })),
    _ => Ok(None),
  }
}

// ─── Enum discriminants ──────────────────────────────────────────────────────

fn unknown(kind: &'static str, value: &str) -> Error {
  Error::UnknownDiscriminant { kind, value: value.to_owned() }
}

pub fn encode_prisoner_status(s: PrisonerStatus) -> &'static str {
  match s {
    PrisonerStatus::InCustody => "in_custody",
    PrisonerStatus::Released => "released",
  }
}

pub fn decode_prisoner_status(s: &str) -> Result<PrisonerStatus> {
  match s {
    "in_custody" => Ok(PrisonerStatus::InCustody),
    "released" => Ok(PrisonerStatus::Released),
    other => Err(unknown("prisoner status", other)),
  }
}

pub fn encode_employee_status(s: EmployeeStatus) -> &'static str {
  match s {
    EmployeeStatus::Active => "active",
    EmployeeStatus::Inactive => "inactive",
  }
}

pub fn decode_employee_status(s: &str) -> Result<EmployeeStatus> {
  match s {
    "active" => Ok(EmployeeStatus::Active),
    "inactive" => Ok(EmployeeStatus::Inactive),
    other => Err(unknown("employee status", other)),
  }
}

pub fn encode_visitor_status(s: VisitorStatus) -> &'static str {
  match s {
    VisitorStatus::Approved => "approved",
    VisitorStatus::Banned => "banned",
  }
}

pub fn decode_visitor_status(s: &str) -> Result<VisitorStatus> {
  match s {
    "approved" => Ok(VisitorStatus::Approved),
    "banned" => Ok(VisitorStatus::Banned),
    other => Err(unknown("visitor status", other)),
  }
}

pub fn encode_visit_status(s: VisitStatus) -> &'static str {
  match s {
    VisitStatus::Scheduled => "scheduled",
    VisitStatus::InProgress => "in_progress",
    VisitStatus::Completed => "completed",
    VisitStatus::Cancelled => "cancelled",
  }
}

pub fn decode_visit_status(s: &str) -> Result<VisitStatus> {
  match s {
    "scheduled" => Ok(VisitStatus::Scheduled),
    "in_progress" => Ok(VisitStatus::InProgress),
    "completed" => Ok(VisitStatus::Completed),
    "cancelled" => Ok(VisitStatus::Cancelled),
    other => Err(unknown("visit status", other)),
  }
}

pub fn encode_task_status(s: TaskStatus) -> &'static str {
  match s {
    TaskStatus::Pending => "pending",
    TaskStatus::InProgress => "in_progress",
    TaskStatus::Completed => "completed",
    TaskStatus::Cancelled => "cancelled",
  }
}

pub fn decode_task_status(s: &str) -> Result<TaskStatus> {
  match s {
    "pending" => Ok(TaskStatus::Pending),
    "in_progress" => Ok(TaskStatus::InProgress),
    "completed" => Ok(TaskStatus::Completed),
    "cancelled" => Ok(TaskStatus::Cancelled),
    other => Err(unknown("task status", other)),
  }
}

pub fn encode_alert_status(s: AlertStatus) -> &'static str {
  match s {
    AlertStatus::Active => "active",
    AlertStatus::Acknowledged => "acknowledged",
    AlertStatus::Resolved => "resolved",
  }
}

pub fn decode_alert_status(s: &str) -> Result<AlertStatus> {
  match s {
    "active" => Ok(AlertStatus::Active),
    "acknowledged" => Ok(AlertStatus::Acknowledged),
    "resolved" => Ok(AlertStatus::Resolved),
    other => Err(unknown("alert status", other)),
  }
}

pub fn encode_severity(s: Severity) -> &'static str {
  match s {
    Severity::Low => "low",
    Severity::Medium => "medium",
    Severity::High => "high",
    Severity::Critical => "critical",
  }
}

pub fn decode_severity(s: &str) -> Result<Severity> {
  match s {
    "low" => Ok(Severity::Low),
    "medium" => Ok(Severity::Medium),
    "high" => Ok(Severity::High),
    "critical" => Ok(Severity::Critical),
    other => Err(unknown("severity", other)),
  }
}

pub fn encode_log_level(l: LogLevel) -> &'static str {
  match l {
    LogLevel::Info => "info",
    LogLevel::Warning => "warning",
    LogLevel::Critical => "critical",
  }
}

pub fn decode_log_level(s: &str) -> Result<LogLevel> {
  match s {
    "info" => Ok(LogLevel::Info),
    "warning" => Ok(LogLevel::Warning),
    "critical" => Ok(LogLevel::Critical),
    other => Err(unknown("log level", other)),
  }
}

pub fn encode_permission_level(l: PermissionLevel) -> &'static str {
  match l {
    PermissionLevel::None => "none",
    PermissionLevel::View => "view",
    PermissionLevel::Edit => "edit",
    PermissionLevel::Full => "full",
  }
}

pub fn decode_permission_level(s: &str) -> Result<PermissionLevel> {
  match s {
    "none" => Ok(PermissionLevel::None),
    "view" => Ok(PermissionLevel::View),
    "edit" => Ok(PermissionLevel::Edit),
    "full" => Ok(PermissionLevel::Full),
    other => Err(unknown("permission level", other)),
  }
}

// ─── Occupant lists ──────────────────────────────────────────────────────────

pub fn encode_occupants(occupants: &[String]) -> Result<String> {
  Ok(serde_json::to_string(occupants)?)
}

pub fn decode_occupants(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `prisoners` row.
pub struct RawPrisoner {
  pub id:          String,
  pub name:        String,
  pub phone:       Option<String>,
  pub cell_id:     Option<String>,
  pub admitted_at: String,
  pub status:      String,
  pub released_by: Option<String>,
  pub released_at: Option<String>,
}

impl RawPrisoner {
  pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      phone:       row.get(2)?,
      cell_id:     row.get(3)?,
      admitted_at: row.get(4)?,
      status:      row.get(5)?,
      released_by: row.get(6)?,
      released_at: row.get(7)?,
    })
  }

  pub fn into_prisoner(self) -> Result<Prisoner> {
    Ok(Prisoner::restore(
      Identity { id: self.id, name: self.name, phone: self.phone },
      self.cell_id,
      decode_dt(&self.admitted_at)?,
      decode_prisoner_status(&self.status)?,
      decode_stamp(self.released_by, self.released_at.as_deref())?,
    ))
  }
}

pub struct RawEmployee {
  pub id:             String,
  pub name:           String,
  pub phone:          Option<String>,
  pub title:          String,
  pub department:     Option<String>,
  pub hired_at:       String,
  pub status:         String,
  pub deactivated_at: Option<String>,
}

impl RawEmployee {
  pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      name:           row.get(1)?,
      phone:          row.get(2)?,
      title:          row.get(3)?,
      department:     row.get(4)?,
      hired_at:       row.get(5)?,
      status:         row.get(6)?,
      deactivated_at: row.get(7)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee::restore(
      Identity { id: self.id, name: self.name, phone: self.phone },
      self.title,
      self.department,
      decode_dt(&self.hired_at)?,
      decode_employee_status(&self.status)?,
      decode_opt_dt(self.deactivated_at.as_deref())?,
    ))
  }
}

pub struct RawVisitor {
  pub id:            String,
  pub name:          String,
  pub phone:         Option<String>,
  pub relationship:  Option<String>,
  pub registered_at: String,
  pub status:        String,
  pub banned_by:     Option<String>,
  pub banned_at:     Option<String>,
  pub ban_reason:    Option<String>,
}

impl RawVisitor {
  pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      name:          row.get(1)?,
      phone:         row.get(2)?,
      relationship:  row.get(3)?,
      registered_at: row.get(4)?,
      status:        row.get(5)?,
      banned_by:     row.get(6)?,
      banned_at:     row.get(7)?,
      ban_reason:    row.get(8)?,
    })
  }

  pub fn into_visitor(self) -> Result<Visitor> {
    Ok(Visitor::restore(
      Identity { id: self.id, name: self.name, phone: self.phone },
      self.relationship,
      decode_dt(&self.registered_at)?,
      decode_visitor_status(&self.status)?,
      decode_stamp(self.banned_by, self.banned_at.as_deref())?,
      self.ban_reason,
    ))
  }
}

pub struct RawCell {
  pub id:          String,
  pub block:       Option<String>,
  pub capacity:    u32,
  pub occupants:   String,
  pub maintenance: bool,
}

impl RawCell {
  pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      block:       row.get(1)?,
      capacity:    row.get(2)?,
      occupants:   row.get(3)?,
      maintenance: row.get(4)?,
    })
  }

  pub fn into_cell(self) -> Result<Cell> {
    Ok(Cell::restore(
      self.id,
      self.block,
      self.capacity,
      decode_occupants(&self.occupants)?,
      self.maintenance,
    ))
  }
}

pub struct RawVisit {
  pub id:               String,
  pub prisoner_id:      String,
  pub visitor_id:       String,
  pub scheduled_at:     String,
  pub duration_minutes: u32,
  pub created_at:       String,
  pub status:           String,
  pub started_at:       Option<String>,
  pub completed_at:     Option<String>,
  pub cancelled_at:     Option<String>,
}

impl RawVisit {
  pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      prisoner_id:      row.get(1)?,
      visitor_id:       row.get(2)?,
      scheduled_at:     row.get(3)?,
      duration_minutes: row.get(4)?,
      created_at:       row.get(5)?,
      status:           row.get(6)?,
      started_at:       row.get(7)?,
      completed_at:     row.get(8)?,
      cancelled_at:     row.get(9)?,
    })
  }

  pub fn into_visit(self) -> Result<Visit> {
    Ok(Visit::restore(
      self.id,
      self.prisoner_id,
      self.visitor_id,
      decode_dt(&self.scheduled_at)?,
      self.duration_minutes,
      decode_dt(&self.created_at)?,
      decode_visit_status(&self.status)?,
      decode_opt_dt(self.started_at.as_deref())?,
      decode_opt_dt(self.completed_at.as_deref())?,
      decode_opt_dt(self.cancelled_at.as_deref())?,
    ))
  }
}

pub struct RawTask {
  pub id:           String,
  pub description:  String,
  pub assigned_to:  String,
  pub created_at:   String,
  pub due_at:       Option<String>,
  pub status:       String,
  pub started_at:   Option<String>,
  pub completed_by: Option<String>,
  pub completed_at: Option<String>,
  pub cancelled_at: Option<String>,
}

impl RawTask {
  pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      description:  row.get(1)?,
      assigned_to:  row.get(2)?,
      created_at:   row.get(3)?,
      due_at:       row.get(4)?,
      status:       row.get(5)?,
      started_at:   row.get(6)?,
      completed_by: row.get(7)?,
      completed_at: row.get(8)?,
      cancelled_at: row.get(9)?,
    })
  }

  pub fn into_task(self) -> Result<Task> {
    Ok(Task::restore(
      self.id,
      self.description,
      self.assigned_to,
      decode_dt(&self.created_at)?,
      decode_opt_dt(self.due_at.as_deref())?,
      decode_task_status(&self.status)?,
      decode_opt_dt(self.started_at.as_deref())?,
      decode_stamp(self.completed_by, self.completed_at.as_deref())?,
      decode_opt_dt(self.cancelled_at.as_deref())?,
    ))
  }
}

pub struct RawAlert {
  pub id:              String,
  pub message:         String,
  pub severity:        String,
  pub location:        Option<String>,
  pub created_at:      String,
  pub status:          String,
  pub acknowledged_by: Option<String>,
  pub acknowledged_at: Option<String>,
  pub resolved_by:     Option<String>,
  pub resolved_at:     Option<String>,
}

impl RawAlert {
  pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      message:         row.get(1)?,
      severity:        row.get(2)?,
      location:        row.get(3)?,
      created_at:      row.get(4)?,
      status:          row.get(5)?,
      acknowledged_by: row.get(6)?,
      acknowledged_at: row.get(7)?,
      resolved_by:     row.get(8)?,
      resolved_at:     row.get(9)?,
    })
  }

  pub fn into_alert(self) -> Result<SecurityAlert> {
    Ok(SecurityAlert::restore(
      self.id,
      self.message,
      decode_severity(&self.severity)?,
      self.location,
      decode_dt(&self.created_at)?,
      decode_alert_status(&self.status)?,
      decode_stamp(self.acknowledged_by, self.acknowledged_at.as_deref())?,
      decode_stamp(self.resolved_by, self.resolved_at.as_deref())?,
    ))
  }
}

pub struct RawLog {
  pub id:        String,
  pub message:   String,
  pub level:     String,
  pub source:    Option<String>,
  pub logged_at: String,
}

impl RawLog {
  pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      message:   row.get(1)?,
      level:     row.get(2)?,
      source:    row.get(3)?,
      logged_at: row.get(4)?,
    })
  }

  pub fn into_log(self) -> Result<SecurityLog> {
    Ok(SecurityLog::restore(
      self.id,
      self.message,
      decode_log_level(&self.level)?,
      self.source,
      decode_dt(&self.logged_at)?,
    ))
  }
}

pub struct RawGrant {
  pub id:         String,
  pub holder_id:  String,
  pub area:       String,
  pub level:      String,
  pub granted_by: String,
  pub granted_at: String,
  pub expires_on: Option<String>,
  pub active:     bool,
  pub revoked_by: Option<String>,
  pub revoked_at: Option<String>,
}

impl RawGrant {
  pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      holder_id:  row.get(1)?,
      area:       row.get(2)?,
      level:      row.get(3)?,
      granted_by: row.get(4)?,
      granted_at: row.get(5)?,
      expires_on: row.get(6)?,
      active:     row.get(7)?,
      revoked_by: row.get(8)?,
      revoked_at: row.get(9)?,
    })
  }

  pub fn into_grant(self) -> Result<AccessGrant> {
    Ok(AccessGrant::restore(
      self.id,
      self.holder_id,
      self.area,
      decode_permission_level(&self.level)?,
      self.granted_by,
      decode_dt(&self.granted_at)?,
      decode_expiry(self.expires_on.as_deref()),
      self.active,
      decode_stamp(self.revoked_by, self.revoked_at.as_deref())?,
    ))
  }
}
