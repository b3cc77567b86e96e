//! Access-control grants.
//!
//! A grant stores an `active` flag and an optional expiry date; what callers
//! act on is the *effective* status, a derived view computed against the
//! current date. Revoked wins over Expired wins over Active.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  identity::{Stamp, require_non_empty},
};

// ─── Permission level ────────────────────────────────────────────────────────

/// Ordinal permission level: `None < View < Edit < Full`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
  None,
  View,
  Edit,
  Full,
}

impl PermissionLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::None => "None",
      Self::View => "View",
      Self::Edit => "Edit",
      Self::Full => "Full",
    }
  }
}

// ─── Effective status ────────────────────────────────────────────────────────

/// The derived grant status — never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantStatus {
  Active,
  Revoked,
  Expired,
}

impl GrantStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Active => "Active",
      Self::Revoked => "Revoked",
      Self::Expired => "Expired",
    }
  }
}

// ─── AccessGrant ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
  id:         String,
  holder_id:  String,
  area:       String,
  level:      PermissionLevel,
  granted_by: String,
  granted_at: DateTime<Utc>,
  expires_on: Option<NaiveDate>,
  active:     bool,
  revoked:    Option<Stamp>,
}

impl AccessGrant {
  /// Grant access to an area. A grant with no `expires_on` is permanent.
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    id: impl Into<String>,
    holder_id: impl Into<String>,
    area: impl Into<String>,
    level: PermissionLevel,
    granted_by: impl Into<String>,
    expires_on: Option<NaiveDate>,
    granted_at: DateTime<Utc>,
  ) -> Result<Self> {
    let id = id.into();
    let holder_id = holder_id.into();
    let area = area.into();
    let granted_by = granted_by.into();
    require_non_empty("id", &id)?;
    require_non_empty("holder_id", &holder_id)?;
    require_non_empty("area", &area)?;
    require_non_empty("granted_by", &granted_by)?;
    Ok(Self {
      id,
      holder_id,
      area,
      level,
      granted_by,
      granted_at,
      expires_on,
      active: true,
      revoked: None,
    })
  }

  /// Reassemble a grant from persisted fields. For storage backends.
  #[allow(clippy::too_many_arguments)]
  pub fn restore(
    id: String,
    holder_id: String,
    area: String,
    level: PermissionLevel,
    granted_by: String,
    granted_at: DateTime<Utc>,
    expires_on: Option<NaiveDate>,
    active: bool,
    revoked: Option<Stamp>,
  ) -> Self {
    Self {
      id,
      holder_id,
      area,
      level,
      granted_by,
      granted_at,
      expires_on,
      active,
      revoked,
    }
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Withdraw the grant. Revoked is terminal; an already-expired grant can
  /// still be revoked (the stored flag and the derived view are distinct).
  pub fn revoke(&mut self, by: &str, at: DateTime<Utc>) -> Result<()> {
    if !self.active {
      return Err(Error::InvalidTransition {
        entity: "grant",
        id:     self.id.clone(),
        action: "revoke",
        status: GrantStatus::Revoked.as_str(),
      });
    }
    self.active = false;
    self.revoked = Some(Stamp::new(by, at));
    Ok(())
  }

  // ── Derived ───────────────────────────────────────────────────────────────

  /// A grant expires at the end of its `expires_on` day; a grant with no
  /// expiry never expires.
  pub fn is_expired(&self, today: NaiveDate) -> bool {
    self.expires_on.is_some_and(|d| d < today)
  }

  /// Revoked if inactive, else Expired if past expiry, else Active.
  /// Pure; never mutates the grant.
  pub fn effective_status(&self, today: NaiveDate) -> GrantStatus {
    if !self.active {
      GrantStatus::Revoked
    } else if self.is_expired(today) {
      GrantStatus::Expired
    } else {
      GrantStatus::Active
    }
  }

  /// The level the holder actually has today: the stored level while the
  /// grant is effectively Active, otherwise `None`.
  pub fn effective_level(&self, today: NaiveDate) -> PermissionLevel {
    if self.effective_status(today) == GrantStatus::Active {
      self.level
    } else {
      PermissionLevel::None
    }
  }

  pub fn can_view(&self, today: NaiveDate) -> bool {
    self.effective_level(today) >= PermissionLevel::View
  }

  pub fn can_edit(&self, today: NaiveDate) -> bool {
    self.effective_level(today) >= PermissionLevel::Edit
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn id(&self) -> &str { &self.id }

  pub fn holder_id(&self) -> &str { &self.holder_id }

  pub fn area(&self) -> &str { &self.area }

  pub fn level(&self) -> PermissionLevel { self.level }

  pub fn granted_by(&self) -> &str { &self.granted_by }

  pub fn granted_at(&self) -> DateTime<Utc> { self.granted_at }

  pub fn expires_on(&self) -> Option<NaiveDate> { self.expires_on }

  pub fn is_active(&self) -> bool { self.active }

  pub fn revoked(&self) -> Option<&Stamp> { self.revoked.as_ref() }
}
