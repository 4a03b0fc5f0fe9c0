//! [`SheetStore`] — the spreadsheet implementation of [`RecordStore`].

use std::future::Future;

use chrono::Utc;
use posyandu_core::{
  child::Child,
  history::{self, HistoryRecord},
  mapping::Mapping,
  store::RecordStore,
};

use crate::{
  Error, Result,
  header::{self, Record},
};

/// Worksheet names inside the backing spreadsheet.
const CHILDREN_TABLE: &str = "children";
const MAPPING_TABLE: &str = "mapping";
const HISTORY_TABLE: &str = "history";

// ─── Row source ──────────────────────────────────────────────────────────────

/// The two spreadsheet operations the adapter consumes, addressed by
/// worksheet name. Implemented by the live [`crate::SheetsClient`] and
/// by an in-memory fake in tests.
pub trait Worksheets: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All rows of `table`, header row first. Empty when the sheet is
  /// empty.
  fn rows<'a>(
    &'a self,
    table: &'a str,
  ) -> impl Future<Output = Result<Vec<Vec<String>>, Self::Error>> + Send + 'a;

  /// Append one row after the last row of `table`.
  fn append<'a>(
    &'a self,
    table: &'a str,
    row: Vec<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by one spreadsheet with `children`, `mapping`
/// and `history` worksheets.
///
/// Every operation re-reads the relevant table in full; the sheet is
/// the single source of truth and nothing is cached.
#[derive(Clone)]
pub struct SheetStore<W> {
  sheet: W,
}

impl<W: Worksheets> SheetStore<W> {
  pub fn new(sheet: W) -> Self {
    Self { sheet }
  }

  #[cfg(test)]
  pub(crate) fn sheet(&self) -> &W {
    &self.sheet
  }

  async fn records(&self, table: &str) -> Result<Vec<Record>> {
    let rows = self
      .sheet
      .rows(table)
      .await
      .map_err(|e| Error::Backend(Box::new(e)))?;
    Ok(header::to_records(rows))
  }
}

fn child_from(record: &Record) -> Child {
  Child {
    child_id:      record.get("child_id").to_string(),
    nama:          record.get("nama").to_string(),
    pin:           record.get("pin").to_string(),
    ttl:           record.get("ttl").to_string(),
    jenis_kelamin: record.get("jenis_kelamin").to_string(),
    orang_tua:     record.get("orang_tua").to_string(),
  }
}

fn mapping_from(record: &Record) -> Mapping {
  Mapping {
    telegram_id: record.get("telegram_id").to_string(),
    child_id:    record.get("child_id").to_string(),
    status:      record.get("status").to_string(),
    created_at:  record.get("created_at").to_string(),
  }
}

fn history_from(record: &Record) -> HistoryRecord {
  let date_raw = record.get("date").to_string();
  HistoryRecord {
    child_id:   record.get("child_id").to_string(),
    date:       history::parse_date(&date_raw),
    date_raw,
    bb:         record.get("bb").to_string(),
    tb:         record.get("tb").to_string(),
    imunisasi:  record.get("imunisasi").to_string(),
    keterangan: record.get("keterangan").to_string(),
    petugas:    record.get("petugas").to_string(),
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl<W: Worksheets> RecordStore for SheetStore<W> {
  type Error = Error;

  async fn find_child(&self, child_id: &str) -> Result<Option<Child>> {
    let records = self.records(CHILDREN_TABLE).await?;
    Ok(
      records
        .iter()
        .find(|record| record.get("child_id") == child_id)
        .map(child_from),
    )
  }

  async fn mapping_for(&self, telegram_id: &str) -> Result<Option<Mapping>> {
    let records = self.records(MAPPING_TABLE).await?;
    // Append order is the only recency signal: the last matching row
    // in table order is the authoritative one.
    Ok(
      records
        .iter()
        .rev()
        .find(|record| record.get("telegram_id") == telegram_id)
        .map(mapping_from),
    )
  }

  async fn register_mapping(
    &self,
    telegram_id: &str,
    child_id: &str,
  ) -> Result<()> {
    let created_at =
      Utc::now().format(Mapping::TIMESTAMP_FORMAT).to_string();
    self
      .sheet
      .append(MAPPING_TABLE, vec![
        telegram_id.to_string(),
        child_id.to_string(),
        Mapping::STATUS_ACTIVE.to_string(),
        created_at,
      ])
      .await
      .map_err(|e| Error::Backend(Box::new(e)))
  }

  async fn add_mapping_if_absent(
    &self,
    telegram_id: &str,
    child_id: &str,
  ) -> Result<bool> {
    match self.mapping_for(telegram_id).await? {
      Some(existing) if existing.child_id == child_id => Ok(false),
      _ => {
        self.register_mapping(telegram_id, child_id).await?;
        Ok(true)
      }
    }
  }

  async fn history(&self, child_id: &str) -> Result<Vec<HistoryRecord>> {
    let records = self.records(HISTORY_TABLE).await?;
    let mut matched: Vec<HistoryRecord> = records
      .iter()
      .filter(|record| record.get("child_id") == child_id)
      .map(history_from)
      .collect();
    history::sort_newest_first(&mut matched);
    Ok(matched)
  }

  async fn latest(&self, child_id: &str) -> Result<Option<HistoryRecord>> {
    Ok(self.history(child_id).await?.into_iter().next())
  }
}
