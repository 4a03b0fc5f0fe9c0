//! Error type for `posyandu-store-sheets`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("jwt signing error: {0}")]
  Jwt(#[from] jsonwebtoken::errors::Error),

  /// The service-account key payload could not be parsed.
  #[error("credentials error: {0}")]
  Credentials(#[from] serde_json::Error),

  /// The OAuth token endpoint refused the assertion.
  #[error("auth error: {0}")]
  Auth(String),

  /// The Sheets API answered with a non-success status.
  #[error("sheets api returned {status} for {context}: {body}")]
  Api {
    status:  u16,
    context: String,
    body:    String,
  },

  /// Failure raised by a non-HTTP [`crate::Worksheets`] implementation.
  #[error("backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
