//! Security alerts and their acknowledge/resolve lifecycle.
//!
//! An alert starts Active and moves forward only: Active → Acknowledged →
//! Resolved (resolving straight from Active is allowed; the acknowledge
//! stamp then simply stays unset). Resolved is terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  identity::{Stamp, require_non_empty},
};

// ─── Severity ────────────────────────────────────────────────────────────────

/// How serious an alert is. Derived ordering: `Low < Medium < High <
/// Critical`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Low,
  Medium,
  High,
  Critical,
}

impl Severity {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Low => "Low",
      Self::Medium => "Medium",
      Self::High => "High",
      Self::Critical => "Critical",
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
  Active,
  Acknowledged,
  Resolved,
}

impl AlertStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Active => "Active",
      Self::Acknowledged => "Acknowledged",
      Self::Resolved => "Resolved",
    }
  }
}

// ─── SecurityAlert ───────────────────────────────────────────────────────────

/// A raised security alert. Status and stamps change only through the
/// guarded transitions below; there is no raw status setter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityAlert {
  id:           String,
  message:      String,
  severity:     Severity,
  location:     Option<String>,
  created_at:   DateTime<Utc>,
  status:       AlertStatus,
  acknowledged: Option<Stamp>,
  resolved:     Option<Stamp>,
}

impl SecurityAlert {
  /// Raise a new alert. Starts Active.
  pub fn new(
    id: impl Into<String>,
    message: impl Into<String>,
    severity: Severity,
    location: Option<String>,
    created_at: DateTime<Utc>,
  ) -> Result<Self> {
    let id = id.into();
    let message = message.into();
    require_non_empty("id", &id)?;
    require_non_empty("message", &message)?;
    Ok(Self {
      id,
      message,
      severity,
      location,
      created_at,
      status: AlertStatus::Active,
      acknowledged: None,
      resolved: None,
    })
  }

  /// Reassemble an alert from persisted fields. For storage backends; does
  /// not re-validate.
  #[allow(clippy::too_many_arguments)]
  pub fn restore(
    id: String,
    message: String,
    severity: Severity,
    location: Option<String>,
    created_at: DateTime<Utc>,
    status: AlertStatus,
    acknowledged: Option<Stamp>,
    resolved: Option<Stamp>,
  ) -> Self {
    Self {
      id,
      message,
      severity,
      location,
      created_at,
      status,
      acknowledged,
      resolved,
    }
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Mark the alert as seen. Requires Active status.
  pub fn acknowledge(&mut self, by: &str, at: DateTime<Utc>) -> Result<()> {
    if self.status != AlertStatus::Active {
      return Err(self.bad_transition("acknowledge"));
    }
    self.status = AlertStatus::Acknowledged;
    self.acknowledged = Some(Stamp::new(by, at));
    Ok(())
  }

  /// Close the alert out. Requires Active or Acknowledged status.
  pub fn resolve(&mut self, by: &str, at: DateTime<Utc>) -> Result<()> {
    if self.status == AlertStatus::Resolved {
      return Err(self.bad_transition("resolve"));
    }
    self.status = AlertStatus::Resolved;
    self.resolved = Some(Stamp::new(by, at));
    Ok(())
  }

  fn bad_transition(&self, action: &'static str) -> Error {
    Error::InvalidTransition {
      entity: "alert",
      id:     self.id.clone(),
      action,
      status: self.status.as_str(),
    }
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn id(&self) -> &str { &self.id }

  pub fn message(&self) -> &str { &self.message }

  pub fn severity(&self) -> Severity { self.severity }

  pub fn location(&self) -> Option<&str> { self.location.as_deref() }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn status(&self) -> AlertStatus { self.status }

  pub fn acknowledged(&self) -> Option<&Stamp> { self.acknowledged.as_ref() }

  pub fn resolved(&self) -> Option<&Stamp> { self.resolved.as_ref() }
}
