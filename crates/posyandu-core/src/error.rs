//! Error types for `posyandu-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// `register` was called with fewer than two arguments.
  #[error("expected two arguments: <child_id> <pin>")]
  InvalidArguments,

  #[error("child not found: {0}")]
  ChildNotFound(String),

  #[error("pin does not match")]
  PinMismatch,

  /// The caller has no mapping row yet.
  #[error("caller is not registered")]
  NotRegistered,

  /// A mapping exists but the child row it points at is gone — a
  /// consistency anomaly in the backing sheet, reported distinctly.
  #[error("child record missing for registered mapping: {0}")]
  ChildRecordMissing(String),

  #[error("no history records for this child")]
  NoHistory,

  /// The backing store could not be asked. Never to be collapsed into
  /// a "no data" condition.
  #[error("store unavailable: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a store backend error.
  pub fn store(source: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(source))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
