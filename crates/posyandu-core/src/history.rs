//! HistoryRecord — one dated developmental observation for a child.
//!
//! Rows are written out-of-band by posyandu staff; this system only
//! reads them. Date cells are typed in by hand, so parsing is lenient
//! and unparseable values are kept (they sort after every dated row).

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the `history` table. Missing cells normalise to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
  pub child_id:   String,
  /// The date cell exactly as it appears in the sheet.
  pub date_raw:   String,
  /// Parsed calendar date; `None` when the cell is unparseable.
  pub date:       Option<NaiveDate>,
  /// Weight in kg.
  pub bb:         String,
  /// Height in cm.
  pub tb:         String,
  pub imunisasi:  String,
  pub keterangan: String,
  pub petugas:    String,
}

impl HistoryRecord {
  /// The date as shown to the caller: ISO formatted when parseable,
  /// otherwise the raw cell value.
  pub fn display_date(&self) -> String {
    match self.date {
      Some(date) => date.format("%Y-%m-%d").to_string(),
      None => self.date_raw.clone(),
    }
  }
}

/// Date formats accepted in history cells, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Leniently parse a hand-typed date cell. A trailing time component
/// (`"2024-03-01 10:00:00"`) is ignored.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
  let cell = cell.trim();
  if cell.is_empty() {
    return None;
  }
  let date_part = cell
    .split_once([' ', 'T'])
    .map(|(date, _)| date)
    .unwrap_or(cell);
  DATE_FORMATS
    .iter()
    .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Order records most-recent-first. Unparseable dates sort last; the
/// sort is stable, so ties and undated rows keep their table order.
pub fn sort_newest_first(records: &mut [HistoryRecord]) {
  records.sort_by(|a, b| match (a.date, b.date) {
    (Some(left), Some(right)) => right.cmp(&left),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  });
}
