//! Child — the identity record a caller links their account to.
//!
//! Rows are created and edited out-of-band by an administrator directly
//! in the spreadsheet; this system never writes them.

use serde::{Deserialize, Serialize};

/// One row of the `children` table.
///
/// The `pin` is a plain-text shared secret handed out by the posyandu
/// and compared string-for-string at registration. It is not hashed —
/// a known weakness of the backing sheet, preserved as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
  pub child_id:      String,
  pub nama:          String,
  pub pin:           String,
  /// Birth date/place, free-form ("tempat, tanggal lahir").
  pub ttl:           String,
  pub jenis_kelamin: String,
  pub orang_tua:     String,
}
