//! Security log entries.
//!
//! Logs are strictly append-only: once recorded, an entry is never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, identity::require_non_empty};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Info,
  Warning,
  Critical,
}

impl LogLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Info => "Info",
      Self::Warning => "Warning",
      Self::Critical => "Critical",
    }
  }
}

/// One immutable log entry. `source` names the reporting officer or
/// subsystem when known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityLog {
  id:        String,
  message:   String,
  level:     LogLevel,
  source:    Option<String>,
  logged_at: DateTime<Utc>,
}

impl SecurityLog {
  pub fn new(
    id: impl Into<String>,
    message: impl Into<String>,
    level: LogLevel,
    source: Option<String>,
    logged_at: DateTime<Utc>,
  ) -> Result<Self> {
    let id = id.into();
    let message = message.into();
    require_non_empty("id", &id)?;
    require_non_empty("message", &message)?;
    Ok(Self { id, message, level, source, logged_at })
  }

  /// Reassemble an entry from persisted fields. For storage backends.
  pub fn restore(
    id: String,
    message: String,
    level: LogLevel,
    source: Option<String>,
    logged_at: DateTime<Utc>,
  ) -> Self {
    Self { id, message, level, source, logged_at }
  }

  pub fn id(&self) -> &str { &self.id }

  pub fn message(&self) -> &str { &self.message }

  pub fn level(&self) -> LogLevel { self.level }

  pub fn source(&self) -> Option<&str> { self.source.as_deref() }

  pub fn logged_at(&self) -> DateTime<Utc> { self.logged_at }

  pub fn is_critical(&self) -> bool { self.level == LogLevel::Critical }
}
