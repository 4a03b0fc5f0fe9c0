//! Mapping — the durable link between a caller identity and a child.
//!
//! The `mapping` table is strictly append-only. A caller may accumulate
//! several rows over time; the most-recently-appended one is
//! authoritative (append order = recency — there is no ordering field).

use serde::{Deserialize, Serialize};

/// One row of the `mapping` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
  /// Stable identity of the messaging account, stored as a string.
  pub telegram_id: String,
  pub child_id:    String,
  /// Status flag; new rows are written with `"yes"`.
  pub status:      String,
  /// UTC creation timestamp, formatted per [`Mapping::TIMESTAMP_FORMAT`].
  pub created_at:  String,
}

impl Mapping {
  /// `chrono` format string for the `created_at` column.
  pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

  /// Status value written for every new row.
  pub const STATUS_ACTIVE: &'static str = "yes";
}
