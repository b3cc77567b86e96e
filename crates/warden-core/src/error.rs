//! Error types for `warden-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was missing or malformed at construction.
  #[error("validation failed for {field}: {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },

  /// A guarded transition's status precondition was not met.
  /// The entity is left unchanged.
  #[error("cannot {action} {entity} {id}: status is {status}")]
  InvalidTransition {
    entity: &'static str,
    id:     String,
    action: &'static str,
    status: &'static str,
  },

  #[error("cell {0} is at capacity")]
  CellFull(String),

  #[error("cell {0} is under maintenance")]
  CellUnderMaintenance(String),

  #[error("occupant {occupant} is already assigned to cell {cell}")]
  AlreadyAssigned { cell: String, occupant: String },

  #[error("occupant {occupant} is not assigned to cell {cell}")]
  NotAssigned { cell: String, occupant: String },
}

impl Error {
  /// `true` for the status-precondition failures (the "state error" class,
  /// as opposed to input validation).
  pub fn is_state_error(&self) -> bool {
    matches!(
      self,
      Self::InvalidTransition { .. }
        | Self::CellFull(_)
        | Self::CellUnderMaintenance(_)
        | Self::AlreadyAssigned { .. }
        | Self::NotAssigned { .. }
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
