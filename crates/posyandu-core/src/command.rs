//! Command parsing and dispatch.
//!
//! The dispatcher is polymorphic over the transport: it sees only the
//! caller's stable identity and the raw message text, and returns a
//! [`Reply`] for the transport to deliver. It never raises — every
//! error is recovered here and translated to user-facing text.

use crate::{
  error::Error,
  reply::{self, Reply},
  store::RecordStore,
  workflow,
};

/// The bot's command keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Start,
  Help,
  Register,
  Profile,
  Latest,
  History,
  Unknown,
}

/// A parsed command plus its untouched argument tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
  pub command: Command,
  pub args:    &'a str,
}

/// Parse a message text into an [`Invocation`]. Returns `None` for
/// plain text that is not a command at all — the bot ignores those.
///
/// In group chats Telegram suffixes the keyword with `@botname`; the
/// suffix is stripped before matching.
pub fn parse(text: &str) -> Option<Invocation<'_>> {
  let rest = text.trim().strip_prefix('/')?;
  let (keyword, args) = match rest.split_once(char::is_whitespace) {
    Some((keyword, args)) => (keyword, args.trim()),
    None => (rest, ""),
  };
  let keyword = keyword.split('@').next().unwrap_or(keyword);

  let command = match keyword.to_ascii_lowercase().as_str() {
    "start" => Command::Start,
    "help" => Command::Help,
    "register" => Command::Register,
    "profile" => Command::Profile,
    "latest" => Command::Latest,
    "history" => Command::History,
    _ => Command::Unknown,
  };
  Some(Invocation { command, args })
}

/// Route one incoming message. `None` means the text was not a command
/// and no reply should be sent.
pub async fn dispatch<S: RecordStore>(
  store: &S,
  caller_id: &str,
  text: &str,
) -> Option<Reply> {
  let invocation = parse(text)?;

  let reply = match invocation.command {
    Command::Start => Reply::markdown(reply::WELCOME),
    Command::Help => Reply::plain(reply::HELP),
    Command::Unknown => Reply::plain(reply::UNKNOWN_COMMAND),

    Command::Register => {
      match workflow::register(store, caller_id, invocation.args).await {
        Ok(child) => reply::registered(&child),
        Err(error) => fail(error, reply::ERROR_REGISTER),
      }
    }

    Command::Profile => match workflow::profile(store, caller_id).await {
      Ok(child) => reply::profile(&child),
      Err(error) => fail(error, reply::ERROR_GENERIC),
    },

    Command::Latest => match workflow::latest(store, caller_id).await {
      Ok(record) => reply::latest(&record),
      Err(Error::NoHistory) => Reply::plain(reply::NO_LATEST),
      Err(error) => fail(error, reply::ERROR_GENERIC),
    },

    Command::History => {
      match workflow::history(store, caller_id, invocation.args).await {
        Ok(records) => reply::history(&records),
        Err(Error::NoHistory) => Reply::plain(reply::NO_HISTORY),
        Err(error) => fail(error, reply::ERROR_GENERIC),
      }
    }
  };
  Some(reply)
}

/// Render a workflow failure. Store errors are logged with their full
/// source chain and answered with `fallback` — the caller only ever
/// sees a generic "try again later".
fn fail(error: Error, fallback: &'static str) -> Reply {
  match &error {
    Error::Store(source) => {
      tracing::error!(%source, "store unavailable");
      Reply::plain(fallback)
    }
    _ => reply::error(&error),
  }
}
