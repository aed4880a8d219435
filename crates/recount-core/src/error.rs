//! Error types for `recount-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The encoded user field did not contain the `<domain>/<user>` separator.
  /// Never downgraded to a skip: dropping identity would silently corrupt
  /// the per-user grouping.
  #[error("malformed user field (expected `domain/user`): {0:?}")]
  MalformedUserField(String),

  #[error("unparseable timestamp: {0:?}")]
  TimestampParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
