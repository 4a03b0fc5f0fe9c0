//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `posyandu-store-sheets`). The workflows depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{child::Child, history::HistoryRecord, mapping::Mapping};

/// Abstraction over the three backing tables (`children`, `mapping`,
/// `history`).
///
/// `children` and `history` are read-only; `mapping` is append-only.
/// Every read re-scans the full relevant table — there is no caching
/// layer, the spreadsheet is the single source of truth.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// First `children` row whose `child_id` equals `child_id` under
  /// string comparison. `None` when the table is empty, has no
  /// `child_id` column, or no row matches.
  fn find_child<'a>(
    &'a self,
    child_id: &'a str,
  ) -> impl Future<Output = Result<Option<Child>, Self::Error>> + Send + 'a;

  /// The **last** `mapping` row in table order whose `telegram_id`
  /// equals `telegram_id` — append order is the only recency signal.
  fn mapping_for<'a>(
    &'a self,
    telegram_id: &'a str,
  ) -> impl Future<Output = Result<Option<Mapping>, Self::Error>> + Send + 'a;

  /// Unconditionally append a mapping row with status
  /// [`Mapping::STATUS_ACTIVE`] and the current UTC timestamp.
  /// Duplicate suppression is [`RecordStore::add_mapping_if_absent`]'s
  /// job, not this method's.
  fn register_mapping<'a>(
    &'a self,
    telegram_id: &'a str,
    child_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Append a mapping unless the caller's current mapping already
  /// points at `child_id` (string-for-string). Returns `true` when a
  /// row was appended.
  ///
  /// A caller may still acquire mappings to *different* children over
  /// time; [`RecordStore::mapping_for`]'s last-row-wins rule keeps
  /// resolution well-defined.
  fn add_mapping_if_absent<'a>(
    &'a self,
    telegram_id: &'a str,
    child_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// All `history` rows for `child_id`, most recent first, with
  /// unparseable dates last and missing cells normalised to `""`.
  fn history<'a>(
    &'a self,
    child_id: &'a str,
  ) -> impl Future<Output = Result<Vec<HistoryRecord>, Self::Error>> + Send + 'a;

  /// The most recent history row for `child_id`, i.e. the head of
  /// [`RecordStore::history`].
  fn latest<'a>(
    &'a self,
    child_id: &'a str,
  ) -> impl Future<Output = Result<Option<HistoryRecord>, Self::Error>> + Send + 'a;
}
