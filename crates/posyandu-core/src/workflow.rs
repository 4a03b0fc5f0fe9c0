//! The registration and query workflows.
//!
//! Each workflow is stateless per attempt — there is no multi-step
//! conversation. All store failures are wrapped as [`Error::Store`] so
//! callers can always tell "no data" apart from "could not ask".

use crate::{
  child::Child,
  error::{Error, Result},
  history::HistoryRecord,
  store::RecordStore,
};

/// Link the caller to a child. `args` is the free text after the
/// command keyword and must carry a child id and a PIN.
///
/// The PIN check is a trimmed plain-text string comparison against the
/// sheet — not a cryptographic check. Replaying the same registration
/// appends nothing but still succeeds, returning the child for the
/// confirmation message.
pub async fn register<S: RecordStore>(
  store: &S,
  caller_id: &str,
  args: &str,
) -> Result<Child> {
  let mut parts = args.split_whitespace();
  let (child_id, pin) = match (parts.next(), parts.next()) {
    (Some(child_id), Some(pin)) => (child_id, pin),
    _ => return Err(Error::InvalidArguments),
  };

  let child = store
    .find_child(child_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::ChildNotFound(child_id.to_string()))?;

  if child.pin.trim() != pin.trim() {
    return Err(Error::PinMismatch);
  }

  store
    .add_mapping_if_absent(caller_id, child_id)
    .await
    .map_err(Error::store)?;

  Ok(child)
}

/// Resolve the caller's mapping, or fail with [`Error::NotRegistered`]
/// before any other table is read.
async fn resolve_child_id<S: RecordStore>(
  store: &S,
  caller_id: &str,
) -> Result<String> {
  store
    .mapping_for(caller_id)
    .await
    .map_err(Error::store)?
    .map(|mapping| mapping.child_id)
    .ok_or(Error::NotRegistered)
}

/// The full child record for the caller's linked child.
pub async fn profile<S: RecordStore>(
  store: &S,
  caller_id: &str,
) -> Result<Child> {
  let child_id = resolve_child_id(store, caller_id).await?;
  store
    .find_child(&child_id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::ChildRecordMissing(child_id))
}

/// The most recent history record for the caller's linked child.
pub async fn latest<S: RecordStore>(
  store: &S,
  caller_id: &str,
) -> Result<HistoryRecord> {
  let child_id = resolve_child_id(store, caller_id).await?;
  store
    .latest(&child_id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NoHistory)
}

/// Up to `limit` history records, most recent first. The limit is the
/// first whitespace-separated token of `args` when it parses as a
/// positive integer; anything else means "all records".
pub async fn history<S: RecordStore>(
  store: &S,
  caller_id: &str,
  args: &str,
) -> Result<Vec<HistoryRecord>> {
  let limit = parse_limit(args);
  let child_id = resolve_child_id(store, caller_id).await?;

  let mut records = store
    .history(&child_id)
    .await
    .map_err(Error::store)?;

  if records.is_empty() {
    return Err(Error::NoHistory);
  }
  if let Some(limit) = limit {
    records.truncate(limit);
  }
  Ok(records)
}

/// `"2"` → `Some(2)`; `""`, `"abc"`, `"0"` and `"-3"` → `None`.
fn parse_limit(args: &str) -> Option<usize> {
  args
    .split_whitespace()
    .next()
    .and_then(|token| token.parse::<usize>().ok())
    .filter(|limit| *limit > 0)
}

#[cfg(test)]
mod tests {
  use super::parse_limit;

  #[test]
  fn limit_parses_positive_integers_only() {
    assert_eq!(parse_limit("2"), Some(2));
    assert_eq!(parse_limit("  5 extra"), Some(5));
    assert_eq!(parse_limit(""), None);
    assert_eq!(parse_limit("abc"), None);
    assert_eq!(parse_limit("0"), None);
    assert_eq!(parse_limit("-3"), None);
  }
}
