//! Prison cells and their occupancy model.
//!
//! A cell's status is never stored: it is a pure function of the occupant
//! count against capacity, overridden by an explicit maintenance flag.
//! `0 <= occupancy <= capacity` holds after every mutation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, identity::require_non_empty};

// ─── Status ──────────────────────────────────────────────────────────────────

/// The derived cell status. Maintenance wins over the occupancy tiers and
/// is only entered or left through the explicit maintenance operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
  Vacant,
  Occupied,
  Full,
  Maintenance,
}

impl CellStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Vacant => "Vacant",
      Self::Occupied => "Occupied",
      Self::Full => "Full",
      Self::Maintenance => "Maintenance",
    }
  }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
  id:          String,
  block:       Option<String>,
  capacity:    u32,
  occupants:   Vec<String>,
  maintenance: bool,
}

impl Cell {
  /// Create a cell. Capacity must be positive.
  pub fn new(
    id: impl Into<String>,
    block: Option<String>,
    capacity: u32,
  ) -> Result<Self> {
    let id = id.into();
    require_non_empty("id", &id)?;
    if capacity == 0 {
      return Err(Error::Validation {
        field:  "capacity",
        reason: "must be positive".into(),
      });
    }
    Ok(Self {
      id,
      block,
      capacity,
      occupants: Vec::new(),
      maintenance: false,
    })
  }

  /// Reassemble a cell from persisted fields. For storage backends.
  pub fn restore(
    id: String,
    block: Option<String>,
    capacity: u32,
    occupants: Vec<String>,
    maintenance: bool,
  ) -> Self {
    Self { id, block, capacity, occupants, maintenance }
  }

  // ── Occupancy mutations ───────────────────────────────────────────────────

  /// Put an occupant in the cell. Fails on a full or maintenance cell and
  /// on a duplicate occupant; on failure the occupant list is unchanged.
  pub fn assign(&mut self, occupant_id: &str) -> Result<()> {
    if self.maintenance {
      return Err(Error::CellUnderMaintenance(self.id.clone()));
    }
    if self.occupants.iter().any(|o| o == occupant_id) {
      return Err(Error::AlreadyAssigned {
        cell:     self.id.clone(),
        occupant: occupant_id.to_owned(),
      });
    }
    if self.occupants.len() as u32 >= self.capacity {
      return Err(Error::CellFull(self.id.clone()));
    }
    self.occupants.push(occupant_id.to_owned());
    Ok(())
  }

  /// Take an occupant out of the cell. Allowed under maintenance so a cell
  /// can be emptied for work; never clears the maintenance flag.
  pub fn remove(&mut self, occupant_id: &str) -> Result<()> {
    let Some(idx) = self.occupants.iter().position(|o| o == occupant_id)
    else {
      return Err(Error::NotAssigned {
        cell:     self.id.clone(),
        occupant: occupant_id.to_owned(),
      });
    };
    self.occupants.remove(idx);
    Ok(())
  }

  pub fn begin_maintenance(&mut self) { self.maintenance = true; }

  pub fn end_maintenance(&mut self) { self.maintenance = false; }

  // ── Derived ───────────────────────────────────────────────────────────────

  /// Recomputed on every call; safe to call repeatedly.
  pub fn status(&self) -> CellStatus {
    if self.maintenance {
      CellStatus::Maintenance
    } else if self.occupants.is_empty() {
      CellStatus::Vacant
    } else if self.occupants.len() as u32 == self.capacity {
      CellStatus::Full
    } else {
      CellStatus::Occupied
    }
  }

  pub fn occupancy(&self) -> usize { self.occupants.len() }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn id(&self) -> &str { &self.id }

  pub fn block(&self) -> Option<&str> { self.block.as_deref() }

  pub fn capacity(&self) -> u32 { self.capacity }

  pub fn occupants(&self) -> &[String] { &self.occupants }

  pub fn under_maintenance(&self) -> bool { self.maintenance }
}
