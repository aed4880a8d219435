//! Error types for `recount-ingest`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// One of the three required event-source files is absent. Always fatal:
  /// a run without all three sources cannot produce a meaningful dataset.
  #[error("required input file missing: {0}")]
  MissingSource(PathBuf),

  #[error("{file}: unterminated quoted field at end of input")]
  UnterminatedQuote { file: String },

  #[error("{file}: missing required column {column:?}")]
  MissingColumn { file: String, column: &'static str },

  #[error("{file} record {index}: expected at least {expected} fields, got {got}")]
  ShortRecord {
    file:     String,
    index:    usize,
    expected: usize,
    got:      usize,
  },

  #[error(transparent)]
  Event(#[from] recount_core::Error),

  #[error("reading {file}: {source}")]
  Io {
    file:   String,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
