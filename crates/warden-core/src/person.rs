//! The person-like records: prisoners, employees, and visitors.
//!
//! Each embeds an [`Identity`] value rather than inheriting from a shared
//! person type. The role-specific fields and transitions live on the role
//! record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  identity::{Identity, Stamp, require_non_empty},
};

// ─── Prisoner ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrisonerStatus {
  InCustody,
  Released,
}

impl PrisonerStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::InCustody => "In Custody",
      Self::Released => "Released",
    }
  }
}

/// A prisoner record. Cell membership is tracked both here (`cell_id`) and
/// on the [`Cell`](crate::cell::Cell) occupant list; callers keep the two
/// in step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prisoner {
  identity:    Identity,
  cell_id:     Option<String>,
  admitted_at: DateTime<Utc>,
  status:      PrisonerStatus,
  released:    Option<Stamp>,
}

impl Prisoner {
  /// Admit a prisoner. Starts In Custody, unassigned to any cell.
  pub fn new(identity: Identity, admitted_at: DateTime<Utc>) -> Self {
    Self {
      identity,
      cell_id: None,
      admitted_at,
      status: PrisonerStatus::InCustody,
      released: None,
    }
  }

  /// Reassemble a prisoner from persisted fields. For storage backends.
  pub fn restore(
    identity: Identity,
    cell_id: Option<String>,
    admitted_at: DateTime<Utc>,
    status: PrisonerStatus,
    released: Option<Stamp>,
  ) -> Self {
    Self { identity, cell_id, admitted_at, status, released }
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Release the prisoner. Requires In Custody; clears the cell assignment.
  /// Released is terminal.
  pub fn release(&mut self, by: &str, at: DateTime<Utc>) -> Result<()> {
    if self.status != PrisonerStatus::InCustody {
      return Err(self.bad_transition("release"));
    }
    self.status = PrisonerStatus::Released;
    self.released = Some(Stamp::new(by, at));
    self.cell_id = None;
    Ok(())
  }

  /// Record a cell assignment. Requires In Custody.
  pub fn move_to_cell(&mut self, cell_id: impl Into<String>) -> Result<()> {
    if self.status != PrisonerStatus::InCustody {
      return Err(self.bad_transition("move to a cell"));
    }
    let cell_id = cell_id.into();
    require_non_empty("cell_id", &cell_id)?;
    self.cell_id = Some(cell_id);
    Ok(())
  }

  /// Clear the cell assignment. Requires In Custody.
  pub fn remove_from_cell(&mut self) -> Result<()> {
    if self.status != PrisonerStatus::InCustody {
      return Err(self.bad_transition("remove from a cell"));
    }
    self.cell_id = None;
    Ok(())
  }

  fn bad_transition(&self, action: &'static str) -> Error {
    Error::InvalidTransition {
      entity: "prisoner",
      id:     self.identity.id.clone(),
      action,
      status: self.status.as_str(),
    }
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn identity(&self) -> &Identity { &self.identity }

  pub fn id(&self) -> &str { &self.identity.id }

  pub fn cell_id(&self) -> Option<&str> { self.cell_id.as_deref() }

  pub fn admitted_at(&self) -> DateTime<Utc> { self.admitted_at }

  pub fn status(&self) -> PrisonerStatus { self.status }

  pub fn released(&self) -> Option<&Stamp> { self.released.as_ref() }
}

// ─── Employee ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
  Active,
  Inactive,
}

impl EmployeeStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Active => "Active",
      Self::Inactive => "Inactive",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
  identity:       Identity,
  title:          String,
  department:     Option<String>,
  hired_at:       DateTime<Utc>,
  status:         EmployeeStatus,
  deactivated_at: Option<DateTime<Utc>>,
}

impl Employee {
  pub fn new(
    identity: Identity,
    title: impl Into<String>,
    department: Option<String>,
    hired_at: DateTime<Utc>,
  ) -> Result<Self> {
    let title = title.into();
    require_non_empty("title", &title)?;
    Ok(Self {
      identity,
      title,
      department,
      hired_at,
      status: EmployeeStatus::Active,
      deactivated_at: None,
    })
  }

  /// Reassemble an employee from persisted fields. For storage backends.
  pub fn restore(
    identity: Identity,
    title: String,
    department: Option<String>,
    hired_at: DateTime<Utc>,
    status: EmployeeStatus,
    deactivated_at: Option<DateTime<Utc>>,
  ) -> Self {
    Self { identity, title, department, hired_at, status, deactivated_at }
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Change the employee's title. Requires Active.
  pub fn promote(&mut self, new_title: impl Into<String>) -> Result<()> {
    if self.status != EmployeeStatus::Active {
      return Err(self.bad_transition("promote"));
    }
    let new_title = new_title.into();
    require_non_empty("title", &new_title)?;
    self.title = new_title;
    Ok(())
  }

  /// Take the employee off the active roster. Inactive is terminal.
  pub fn deactivate(&mut self, at: DateTime<Utc>) -> Result<()> {
    if self.status != EmployeeStatus::Active {
      return Err(self.bad_transition("deactivate"));
    }
    self.status = EmployeeStatus::Inactive;
    self.deactivated_at = Some(at);
    Ok(())
  }

  fn bad_transition(&self, action: &'static str) -> Error {
    Error::InvalidTransition {
      entity: "employee",
      id:     self.identity.id.clone(),
      action,
      status: self.status.as_str(),
    }
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn identity(&self) -> &Identity { &self.identity }

  pub fn id(&self) -> &str { &self.identity.id }

  pub fn title(&self) -> &str { &self.title }

  pub fn department(&self) -> Option<&str> { self.department.as_deref() }

  pub fn hired_at(&self) -> DateTime<Utc> { self.hired_at }

  pub fn status(&self) -> EmployeeStatus { self.status }

  pub fn deactivated_at(&self) -> Option<DateTime<Utc>> {
    self.deactivated_at
  }
}

// ─── Visitor ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorStatus {
  Approved,
  Banned,
}

impl VisitorStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Approved => "Approved",
      Self::Banned => "Banned",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visitor {
  identity:      Identity,
  relationship:  Option<String>,
  registered_at: DateTime<Utc>,
  status:        VisitorStatus,
  banned:        Option<Stamp>,
  ban_reason:    Option<String>,
}

impl Visitor {
  pub fn new(
    identity: Identity,
    relationship: Option<String>,
    registered_at: DateTime<Utc>,
  ) -> Self {
    Self {
      identity,
      relationship,
      registered_at,
      status: VisitorStatus::Approved,
      banned: None,
      ban_reason: None,
    }
  }

  /// Reassemble a visitor from persisted fields. For storage backends.
  pub fn restore(
    identity: Identity,
    relationship: Option<String>,
    registered_at: DateTime<Utc>,
    status: VisitorStatus,
    banned: Option<Stamp>,
    ban_reason: Option<String>,
  ) -> Self {
    Self { identity, relationship, registered_at, status, banned, ban_reason }
  }

  /// Bar the visitor from the facility. Requires Approved; Banned is
  /// terminal.
  pub fn ban(
    &mut self,
    by: &str,
    reason: Option<String>,
    at: DateTime<Utc>,
  ) -> Result<()> {
    if self.status != VisitorStatus::Approved {
      return Err(Error::InvalidTransition {
        entity: "visitor",
        id:     self.identity.id.clone(),
        action: "ban",
        status: self.status.as_str(),
      });
    }
    self.status = VisitorStatus::Banned;
    self.banned = Some(Stamp::new(by, at));
    self.ban_reason = reason;
    Ok(())
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn identity(&self) -> &Identity { &self.identity }

  pub fn id(&self) -> &str { &self.identity.id }

  pub fn relationship(&self) -> Option<&str> { self.relationship.as_deref() }

  pub fn registered_at(&self) -> DateTime<Utc> { self.registered_at }

  pub fn status(&self) -> VisitorStatus { self.status }

  pub fn banned(&self) -> Option<&Stamp> { self.banned.as_ref() }

  pub fn ban_reason(&self) -> Option<&str> { self.ban_reason.as_deref() }
}
