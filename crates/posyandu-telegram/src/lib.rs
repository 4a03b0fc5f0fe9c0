//! Telegram transport for the Posyandu bot.
//!
//! Long-polls the Bot API and routes each text message through the
//! core dispatcher. The transport knows nothing about the workflows —
//! it only carries the caller's identity and the message text in, and
//! a [`Reply`](posyandu_core::reply::Reply) out.

pub mod error;
pub mod telegram;

pub use error::{Error, Result};

use std::time::Duration;

use posyandu_core::{command, store::RecordStore};
use serde::Deserialize;

use telegram::TelegramClient;

/// Wait before retrying after a failed `getUpdates` call.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Runtime configuration — the bot's three external connection
/// parameters, deserialised from `config.toml` and/or `POSYANDU_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
  /// Bot access token issued by @BotFather.
  pub telegram_token:   String,
  /// Document id of the backing spreadsheet.
  pub spreadsheet_id:   String,
  /// Service-account key JSON payload, passed through verbatim.
  pub credentials_json: String,
}

/// Poll for updates forever, handling each one independently. Transport
/// failures are logged and retried; they never take the bot down.
pub async fn run<S>(client: TelegramClient, store: S)
where
  S: RecordStore,
{
  let mut offset = 0i64;
  tracing::info!("bot started, polling for updates");

  loop {
    let updates = match client.get_updates(offset).await {
      Ok(updates) => updates,
      Err(error) => {
        tracing::warn!(%error, "getUpdates failed, backing off");
        tokio::time::sleep(POLL_RETRY_DELAY).await;
        continue;
      }
    };

    for update in updates {
      offset = offset.max(update.update_id + 1);

      let Some(message) = update.message else { continue };
      let chat_id = message.chat.id;
      let Some(text) = message.text else { continue };
      let Some(from) = message.from else { continue };

      let caller_id = from.id.to_string();
      let Some(reply) = command::dispatch(&store, &caller_id, &text).await
      else {
        // Plain text that is not a command; the bot stays silent.
        continue;
      };

      if let Err(error) = client.send_message(chat_id, &reply).await {
        tracing::warn!(%error, chat_id, "failed to deliver reply");
      }
    }
  }
}
