//! Error type for `warden-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] warden_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown {kind} discriminant: {value:?}")]
  UnknownDiscriminant {
    kind:  &'static str,
    value: String,
  },

  /// An `update_*` targeted an ID with no row. Nothing was written.
  #[error("{entity} not found: {id}")]
  NotFound {
    entity: &'static str,
    id:     String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
