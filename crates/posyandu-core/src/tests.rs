//! Workflow and dispatch tests against an in-memory store.

use std::sync::{
  Mutex,
  atomic::{AtomicUsize, Ordering},
};

use chrono::Utc;

use crate::{
  Error,
  child::Child,
  command::{self, Command},
  history::{self, HistoryRecord},
  mapping::Mapping,
  reply,
  store::RecordStore,
  workflow,
};

// ─── In-memory store ─────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("backend down")]
struct Down;

/// A `RecordStore` holding seeded rows in memory. `down` makes every
/// operation fail, simulating an unreachable backend. Read counters
/// let tests assert that short-circuits really skip table reads.
#[derive(Default)]
struct MemStore {
  children:      Vec<Child>,
  history:       Vec<HistoryRecord>,
  mappings:      Mutex<Vec<Mapping>>,
  down:          bool,
  child_reads:   AtomicUsize,
  history_reads: AtomicUsize,
}

impl MemStore {
  fn check(&self) -> Result<(), Down> {
    if self.down { Err(Down) } else { Ok(()) }
  }

  fn mapping_rows(&self) -> usize {
    self.mappings.lock().unwrap().len()
  }
}

impl RecordStore for MemStore {
  type Error = Down;

  async fn find_child(&self, child_id: &str) -> Result<Option<Child>, Down> {
    self.check()?;
    self.child_reads.fetch_add(1, Ordering::SeqCst);
    Ok(
      self
        .children
        .iter()
        .find(|child| child.child_id == child_id)
        .cloned(),
    )
  }

  async fn mapping_for(
    &self,
    telegram_id: &str,
  ) -> Result<Option<Mapping>, Down> {
    self.check()?;
    Ok(
      self
        .mappings
        .lock()
        .unwrap()
        .iter()
        .rev()
        .find(|mapping| mapping.telegram_id == telegram_id)
        .cloned(),
    )
  }

  async fn register_mapping(
    &self,
    telegram_id: &str,
    child_id: &str,
  ) -> Result<(), Down> {
    self.check()?;
    self.mappings.lock().unwrap().push(Mapping {
      telegram_id: telegram_id.to_string(),
      child_id:    child_id.to_string(),
      status:      Mapping::STATUS_ACTIVE.to_string(),
      created_at:  Utc::now().format(Mapping::TIMESTAMP_FORMAT).to_string(),
    });
    Ok(())
  }

  async fn add_mapping_if_absent(
    &self,
    telegram_id: &str,
    child_id: &str,
  ) -> Result<bool, Down> {
    match self.mapping_for(telegram_id).await? {
      Some(existing) if existing.child_id == child_id => Ok(false),
      _ => {
        self.register_mapping(telegram_id, child_id).await?;
        Ok(true)
      }
    }
  }

  async fn history(
    &self,
    child_id: &str,
  ) -> Result<Vec<HistoryRecord>, Down> {
    self.check()?;
    self.history_reads.fetch_add(1, Ordering::SeqCst);
    let mut records: Vec<HistoryRecord> = self
      .history
      .iter()
      .filter(|record| record.child_id == child_id)
      .cloned()
      .collect();
    history::sort_newest_first(&mut records);
    Ok(records)
  }

  async fn latest(
    &self,
    child_id: &str,
  ) -> Result<Option<HistoryRecord>, Down> {
    Ok(self.history(child_id).await?.into_iter().next())
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn aisyah() -> Child {
  Child {
    child_id: "C1".into(),
    nama: "Aisyah".into(),
    pin: "111111".into(),
    ttl: "Bandung, 2023-05-10".into(),
    jenis_kelamin: "P".into(),
    orang_tua: "Ibu Siti".into(),
  }
}

fn record(child_id: &str, date: &str) -> HistoryRecord {
  HistoryRecord {
    child_id: child_id.into(),
    date_raw: date.into(),
    date: history::parse_date(date),
    bb: "8.5".into(),
    tb: "70".into(),
    imunisasi: "DPT".into(),
    keterangan: "sehat".into(),
    petugas: "Bidan Rina".into(),
  }
}

fn seeded() -> MemStore {
  MemStore { children: vec![aisyah()], ..MemStore::default() }
}

// ─── Registration ────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_succeeds_with_matching_pin() {
  let store = seeded();
  let child = workflow::register(&store, "42", "C1 111111").await.unwrap();
  assert_eq!(child.nama, "Aisyah");
  assert_eq!(store.mapping_rows(), 1);
}

#[tokio::test]
async fn register_pin_mismatch_appends_nothing() {
  let store = seeded();
  let result = workflow::register(&store, "42", "C1 222222").await;
  assert!(matches!(result, Err(Error::PinMismatch)));
  assert_eq!(store.mapping_rows(), 0);
}

#[tokio::test]
async fn register_unknown_child() {
  let store = seeded();
  let result = workflow::register(&store, "42", "C2 111111").await;
  assert!(matches!(result, Err(Error::ChildNotFound(id)) if id == "C2"));
  assert_eq!(store.mapping_rows(), 0);
}

#[tokio::test]
async fn register_requires_two_arguments() {
  let store = seeded();
  for args in ["", "C1"] {
    let result = workflow::register(&store, "42", args).await;
    assert!(matches!(result, Err(Error::InvalidArguments)));
  }
  assert_eq!(store.mapping_rows(), 0);
}

#[tokio::test]
async fn register_trims_pin_before_comparison() {
  let mut store = seeded();
  store.children[0].pin = " 111111 ".into();
  workflow::register(&store, "42", "C1 111111").await.unwrap();
  assert_eq!(store.mapping_rows(), 1);
}

#[tokio::test]
async fn register_replay_is_idempotent_but_still_succeeds() {
  let store = seeded();
  workflow::register(&store, "42", "C1 111111").await.unwrap();
  let child = workflow::register(&store, "42", "C1 111111").await.unwrap();
  assert_eq!(child.nama, "Aisyah");
  assert_eq!(store.mapping_rows(), 1);
}

#[tokio::test]
async fn register_different_child_appends_and_latest_wins() {
  let mut store = seeded();
  store.children.push(Child {
    child_id: "C2".into(),
    nama: "Budi".into(),
    pin: "222222".into(),
    ..Child::default()
  });

  workflow::register(&store, "42", "C1 111111").await.unwrap();
  workflow::register(&store, "42", "C2 222222").await.unwrap();
  assert_eq!(store.mapping_rows(), 2);

  // The most recent mapping is the one queries resolve.
  let child = workflow::profile(&store, "42").await.unwrap();
  assert_eq!(child.child_id, "C2");
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unregistered_caller_short_circuits() {
  let store = seeded();
  for result in [
    workflow::profile(&store, "42").await.map(|_| ()),
    workflow::latest(&store, "42").await.map(|_| ()),
    workflow::history(&store, "42", "").await.map(|_| ()),
  ] {
    assert!(matches!(result, Err(Error::NotRegistered)));
  }
  // No children or history read may have been attempted.
  assert_eq!(store.child_reads.load(Ordering::SeqCst), 0);
  assert_eq!(store.history_reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn profile_reports_vanished_child_row() {
  let store = seeded();
  workflow::register(&store, "42", "C1 111111").await.unwrap();

  let store = MemStore {
    mappings: Mutex::new(store.mappings.into_inner().unwrap()),
    ..MemStore::default()
  };
  let result = workflow::profile(&store, "42").await;
  assert!(matches!(result, Err(Error::ChildRecordMissing(id)) if id == "C1"));
}

#[tokio::test]
async fn latest_returns_most_recent_record() {
  let mut store = seeded();
  store.history = vec![record("C1", "2024-01-01"), record("C1", "2024-03-01")];
  workflow::register(&store, "42", "C1 111111").await.unwrap();

  let latest = workflow::latest(&store, "42").await.unwrap();
  assert_eq!(latest.display_date(), "2024-03-01");
}

#[tokio::test]
async fn latest_with_no_records_is_no_history() {
  let store = seeded();
  workflow::register(&store, "42", "C1 111111").await.unwrap();
  let result = workflow::latest(&store, "42").await;
  assert!(matches!(result, Err(Error::NoHistory)));
}

#[tokio::test]
async fn history_limit_and_default() {
  let mut store = seeded();
  store.history = (1..=5)
    .map(|month| record("C1", &format!("2024-0{month}-01")))
    .collect();
  workflow::register(&store, "42", "C1 111111").await.unwrap();

  let two = workflow::history(&store, "42", "2").await.unwrap();
  assert_eq!(two.len(), 2);
  assert_eq!(two[0].display_date(), "2024-05-01");
  assert_eq!(two[1].display_date(), "2024-04-01");

  let all = workflow::history(&store, "42", "").await.unwrap();
  assert_eq!(all.len(), 5);

  // Non-numeric limit means "all records".
  let all = workflow::history(&store, "42", "semua").await.unwrap();
  assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn store_failure_is_not_reported_as_no_data() {
  let store = MemStore { down: true, ..MemStore::default() };
  let result = workflow::latest(&store, "42").await;
  assert!(matches!(result, Err(Error::Store(_))));
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

#[test]
fn history_sorts_descending_with_unparseable_last() {
  let mut records = vec![
    record("C1", "2024-01-01"),
    record("C1", "catatan lama"),
    record("C1", "2024-03-01"),
    record("C1", ""),
    record("C1", "2024-02-01"),
  ];
  history::sort_newest_first(&mut records);

  let dates: Vec<String> =
    records.iter().map(|r| r.date_raw.clone()).collect();
  assert_eq!(
    dates,
    ["2024-03-01", "2024-02-01", "2024-01-01", "catatan lama", ""]
  );
}

#[test]
fn date_parsing_is_lenient() {
  assert!(history::parse_date("2024-03-01").is_some());
  assert!(history::parse_date("01/03/2024").is_some());
  assert!(history::parse_date("2024-03-01 10:30:00").is_some());
  assert!(history::parse_date("besok").is_none());
  assert!(history::parse_date("").is_none());
}

// ─── Command parsing & dispatch ──────────────────────────────────────────────

#[test]
fn parse_recognises_keywords_and_args() {
  let invocation = command::parse("/register C1 111111").unwrap();
  assert_eq!(invocation.command, Command::Register);
  assert_eq!(invocation.args, "C1 111111");

  let invocation = command::parse("/history 3").unwrap();
  assert_eq!(invocation.command, Command::History);
  assert_eq!(invocation.args, "3");
}

#[test]
fn parse_strips_botname_suffix() {
  let invocation = command::parse("/latest@PosyanduBot").unwrap();
  assert_eq!(invocation.command, Command::Latest);
}

#[test]
fn parse_ignores_plain_text() {
  assert!(command::parse("halo bot").is_none());
  assert!(command::parse("").is_none());
}

#[test]
fn parse_flags_unknown_keywords() {
  let invocation = command::parse("/delete C1").unwrap();
  assert_eq!(invocation.command, Command::Unknown);
}

#[tokio::test]
async fn dispatch_register_replies_with_child_name() {
  let store = seeded();
  let reply = command::dispatch(&store, "42", "/register C1 111111")
    .await
    .unwrap();
  assert!(reply.text.contains("Aisyah"));
  assert!(reply.markdown);
}

#[tokio::test]
async fn dispatch_static_and_unknown_commands() {
  let store = seeded();

  let start = command::dispatch(&store, "42", "/start").await.unwrap();
  assert_eq!(start.text, reply::WELCOME);
  assert!(start.markdown);

  let help = command::dispatch(&store, "42", "/help").await.unwrap();
  assert_eq!(help.text, reply::HELP);

  let unknown = command::dispatch(&store, "42", "/hapus").await.unwrap();
  assert_eq!(unknown.text, reply::UNKNOWN_COMMAND);
}

#[tokio::test]
async fn dispatch_store_failure_stays_generic() {
  let store = MemStore { down: true, ..MemStore::default() };
  let reply = command::dispatch(&store, "42", "/latest").await.unwrap();
  assert_eq!(reply.text, reply::ERROR_GENERIC);

  let reply = command::dispatch(&store, "42", "/register C1 111111")
    .await
    .unwrap();
  assert_eq!(reply.text, reply::ERROR_REGISTER);
}

#[tokio::test]
async fn dispatch_no_history_texts_differ_per_command() {
  let store = seeded();
  workflow::register(&store, "42", "C1 111111").await.unwrap();

  let latest = command::dispatch(&store, "42", "/latest").await.unwrap();
  assert_eq!(latest.text, reply::NO_LATEST);

  let history = command::dispatch(&store, "42", "/history").await.unwrap();
  assert_eq!(history.text, reply::NO_HISTORY);
}
