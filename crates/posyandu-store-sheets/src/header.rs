//! Header normalization and row-to-record conversion.
//!
//! Worksheet headers are typed in by hand, so `"Child ID"`, `"child_id"`
//! and `" child-id "` must all address the same column. Normalization
//! happens exactly once, here, at the boundary — the rest of the crate
//! only ever sees canonical column names.

use std::collections::HashMap;

/// Canonical form of a header cell: trimmed, lowercased, runs of
/// spaces, hyphens and underscores folded to a single `_`.
pub fn normalize(header: &str) -> String {
  let mut out = String::with_capacity(header.len());
  let mut pending_separator = false;
  for ch in header.trim().chars() {
    if ch == ' ' || ch == '-' || ch == '_' {
      // Leading separators are dropped entirely.
      pending_separator = !out.is_empty();
      continue;
    }
    if pending_separator {
      out.push('_');
      pending_separator = false;
    }
    out.extend(ch.to_lowercase());
  }
  out
}

/// One data row addressed by normalized column name.
#[derive(Debug, Clone, Default)]
pub struct Record {
  cells: HashMap<String, String>,
}

impl Record {
  /// The value under `column`, or `""` when the cell (or the whole
  /// column) is missing.
  pub fn get(&self, column: &str) -> &str {
    self.cells.get(column).map(String::as_str).unwrap_or("")
  }
}

/// Convert a raw grid — header row first — into records. An empty grid
/// or a grid with only a header yields no records. Rows shorter than
/// the header simply lack those cells; cells past the last header are
/// dropped.
pub fn to_records(rows: Vec<Vec<String>>) -> Vec<Record> {
  let mut rows = rows.into_iter();
  let Some(header) = rows.next() else {
    return Vec::new();
  };
  let columns: Vec<String> =
    header.iter().map(|cell| normalize(cell)).collect();

  rows
    .map(|row| {
      let mut cells = HashMap::new();
      for (column, value) in columns.iter().zip(row) {
        if !column.is_empty() {
          cells.insert(column.clone(), value);
        }
      }
      Record { cells }
    })
    .collect()
}
