//! Error types for `rift-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown subject code: {0:?}")]
  UnknownSubject(String),

  #[error("no subjects to process")]
  NoSubjects,

  /// Loading state before the run or writing it at the commit point failed.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
