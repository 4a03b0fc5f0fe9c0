//! Error type for `posyandu-telegram`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The Bot API answered `ok: false`.
  #[error("telegram api error: {0}")]
  Api(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
