//! User-facing reply texts and formatting.
//!
//! Every workflow outcome — success or failure — is rendered here into
//! a [`Reply`] the transport can deliver verbatim. The wording is the
//! bot's Indonesian voice; no internal detail ever leaks into a reply.

use crate::{child::Child, error::Error, history::HistoryRecord};

/// A response ready for delivery back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
  pub text:     String,
  /// Deliver with lightweight markup (Telegram Markdown) enabled.
  pub markdown: bool,
}

impl Reply {
  pub fn plain(text: impl Into<String>) -> Self {
    Self { text: text.into(), markdown: false }
  }

  pub fn markdown(text: impl Into<String>) -> Self {
    Self { text: text.into(), markdown: true }
  }
}

// ─── Static texts ────────────────────────────────────────────────────────────

pub const WELCOME: &str = "Assalamu'alaikum 👋\n\n\
  Selamat datang di Bot Posyandu.\n\n\
  Untuk mendaftar/link akun anak ke Telegram Anda, gunakan perintah:\n\
  `/register <child_id> <PIN>`\n\n\
  Contoh: `/register C12345 987654`\n\n\
  Setelah terdaftar, gunakan:\n\
  `/latest` - data terakhir\n\
  `/history [n]` - n entri terakhir (default semua)\n\
  `/profile` - profil anak\n\
  `/help` - bantuan\n";

pub const HELP: &str = "Daftar perintah:\n\
  /start - Mulai\n\
  /register <child_id> <PIN> - Daftar anak\n\
  /latest - Lihat rekam terakhir\n\
  /history [n] - Lihat histori (opsional parameter n)\n\
  /profile - Lihat profil anak\n\
  /help - Bantuan";

pub const UNKNOWN_COMMAND: &str =
  "Maaf, perintah tidak dikenal. Ketik /help untuk daftar perintah.";

pub const NO_LATEST: &str = "Belum ada data perkembangan untuk anak ini.";

pub const NO_HISTORY: &str = "Belum ada data histori untuk anak ini.";

pub const ERROR_REGISTER: &str =
  "Terjadi error saat registrasi. Coba lagi nanti.";

pub const ERROR_GENERIC: &str = "Terjadi kesalahan. Coba lagi nanti.";

// ─── Success rendering ───────────────────────────────────────────────────────

/// Confirmation for a (possibly replayed) successful registration.
pub fn registered(child: &Child) -> Reply {
  Reply::markdown(format!(
    "Berhasil terdaftar untuk anak *{}* (ID: {}).",
    child.nama, child.child_id
  ))
}

pub fn profile(child: &Child) -> Reply {
  Reply::plain(format!(
    "Profil Anak:\n\
     Nama: {}\n\
     Child ID: {}\n\
     TTL: {}\n\
     Jenis kelamin: {}\n\
     Orang tua: {}\n",
    child.nama, child.child_id, child.ttl, child.jenis_kelamin, child.orang_tua
  ))
}

pub fn latest(record: &HistoryRecord) -> Reply {
  Reply::plain(format!(
    "Rekaman Terbaru:\n\
     Tanggal: {}\n\
     Berat badan (kg): {}\n\
     Tinggi (cm): {}\n\
     Imunisasi: {}\n\
     Keterangan: {}\n\
     Petugas: {}\n",
    record.display_date(),
    record.bb,
    record.tb,
    record.imunisasi,
    record.keterangan,
    record.petugas
  ))
}

pub fn history(records: &[HistoryRecord]) -> Reply {
  let lines: Vec<String> = records
    .iter()
    .map(|record| {
      format!(
        "{}: BB={} kg, TB={} cm, Imun:{}, Note:{}",
        record.display_date(),
        record.bb,
        record.tb,
        record.imunisasi,
        record.keterangan
      )
    })
    .collect();
  Reply::plain(format!("Histori:\n{}", lines.join("\n")))
}

// ─── Failure rendering ───────────────────────────────────────────────────────

/// Map a workflow error to its user-facing text. [`Error::Store`]
/// renders as the generic message only — backend detail never reaches
/// the caller (the dispatcher also logs it before replying).
pub fn error(error: &Error) -> Reply {
  match error {
    Error::InvalidArguments => Reply::plain(
      "Format: /register <child_id> <PIN>\nContoh: /register C12345 987654",
    ),
    Error::ChildNotFound(child_id) => Reply::markdown(format!(
      "Child ID `{child_id}` tidak ditemukan. Mohon cek kembali."
    )),
    Error::PinMismatch => {
      Reply::plain("PIN tidak cocok. Mohon cek PIN yang diberikan posyandu.")
    }
    Error::NotRegistered => {
      Reply::plain("Anda belum terdaftar. Silakan /register <child_id> <PIN>.")
    }
    Error::ChildRecordMissing(_) => {
      Reply::plain("Profil anak tidak ditemukan di sheet.")
    }
    Error::NoHistory => Reply::plain(NO_LATEST),
    Error::Store(_) => Reply::plain(ERROR_GENERIC),
  }
}
