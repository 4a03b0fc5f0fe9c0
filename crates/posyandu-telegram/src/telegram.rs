//! Minimal async client for the Telegram Bot API.
//!
//! Wraps only the two methods the bot needs: long-polling `getUpdates`
//! and `sendMessage`. Updates other than plain text messages are
//! dropped at deserialization — their fields simply come back `None`.

use std::time::Duration;

use posyandu_core::reply::Reply;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

use crate::{Error, Result};

const API_BASE: &str = "https://api.telegram.org";

/// Long-poll wait passed to `getUpdates`, in seconds.
pub const POLL_TIMEOUT_SECS: u64 = 30;

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct Update {
  pub update_id: i64,
  pub message:   Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
  pub chat: Chat,
  pub from: Option<User>,
  pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
  pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct User {
  pub id: i64,
}

/// Envelope every Bot API response arrives in.
#[derive(Deserialize)]
struct ApiResponse<T> {
  ok:          bool,
  result:      Option<T>,
  description: Option<String>,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async Bot API client. Cheap to clone — the inner [`reqwest::Client`]
/// is `Arc`-based.
#[derive(Clone)]
pub struct TelegramClient {
  http: Client,
  base: String,
}

impl TelegramClient {
  pub fn new(token: &str) -> Result<Self> {
    // The request timeout must outlast the long-poll wait.
    let http = Client::builder()
      .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
      .build()?;
    Ok(Self { http, base: format!("{API_BASE}/bot{token}") })
  }

  async fn call<T: DeserializeOwned>(
    &self,
    method: &str,
    payload: &serde_json::Value,
  ) -> Result<T> {
    let response = self
      .http
      .post(format!("{}/{method}", self.base))
      .json(payload)
      .send()
      .await?;

    let body: ApiResponse<T> = response.json().await?;
    if !body.ok {
      return Err(Error::Api(
        body.description.unwrap_or_else(|| "no description".to_string()),
      ));
    }
    body
      .result
      .ok_or_else(|| Error::Api("response carried no result".to_string()))
  }

  /// Long-poll for updates with id >= `offset`.
  pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
    self
      .call("getUpdates", &json!({
        "offset": offset,
        "timeout": POLL_TIMEOUT_SECS,
        "allowed_updates": ["message"],
      }))
      .await
  }

  /// Deliver `reply` to `chat_id`.
  pub async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<()> {
    let mut payload = json!({ "chat_id": chat_id, "text": reply.text });
    if reply.markdown {
      payload["parse_mode"] = json!("Markdown");
    }
    self.call::<serde_json::Value>("sendMessage", &payload).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn update_payload_deserialises() {
    let raw = r#"{
      "ok": true,
      "result": [{
        "update_id": 100,
        "message": {
          "message_id": 5,
          "chat": { "id": 42, "type": "private" },
          "from": { "id": 42, "is_bot": false, "first_name": "Siti" },
          "text": "/latest"
        }
      }]
    }"#;

    let body: ApiResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
    assert!(body.ok);
    let updates = body.result.unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].update_id, 100);

    let message = updates[0].message.as_ref().unwrap();
    assert_eq!(message.chat.id, 42);
    assert_eq!(message.from.as_ref().unwrap().id, 42);
    assert_eq!(message.text.as_deref(), Some("/latest"));
  }

  #[test]
  fn non_text_updates_deserialise_with_empty_fields() {
    let raw = r#"{
      "ok": true,
      "result": [{
        "update_id": 101,
        "message": {
          "message_id": 6,
          "chat": { "id": 42, "type": "private" }
        }
      }]
    }"#;

    let body: ApiResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
    let updates = body.result.unwrap();
    let message = updates[0].message.as_ref().unwrap();
    assert!(message.text.is_none());
    assert!(message.from.is_none());
  }

  #[test]
  fn error_envelope_carries_description() {
    let raw = r#"{ "ok": false, "description": "Unauthorized" }"#;
    let body: ApiResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
    assert!(!body.ok);
    assert_eq!(body.description.as_deref(), Some("Unauthorized"));
  }
}
