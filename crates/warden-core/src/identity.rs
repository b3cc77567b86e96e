//! Shared identity and transition-stamp values.
//!
//! Person-like records (prisoners, employees, visitors) embed an
//! [`Identity`] by composition — there is no person supertype.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Identity ────────────────────────────────────────────────────────────────

/// The identity fields every person-like record carries. The `id` is the
/// sole equality key for its entity type and never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub id:    String,
  pub name:  String,
  pub phone: Option<String>,
}

impl Identity {
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    phone: Option<String>,
  ) -> Result<Self> {
    let id = id.into();
    let name = name.into();
    require_non_empty("id", &id)?;
    require_non_empty("name", &name)?;
    Ok(Self { id, name, phone })
  }
}

// ─── Stamp ───────────────────────────────────────────────────────────────────

/// Actor + timestamp recorded when a guarded transition fires.
/// Set exactly once, when the transition happens; `None` until then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
  pub by: String,
  pub at: DateTime<Utc>,
}

impl Stamp {
  pub fn new(by: impl Into<String>, at: DateTime<Utc>) -> Self {
    Self { by: by.into(), at }
  }
}

// ─── Validation helpers ──────────────────────────────────────────────────────

/// Reject empty or whitespace-only required string fields.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Validation {
      field,
      reason: "must not be empty".into(),
    });
  }
  Ok(())
}
