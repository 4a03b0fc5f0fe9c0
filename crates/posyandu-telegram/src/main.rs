//! posyandu-bot binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus
//! `POSYANDU_*` environment variables, opens the backing spreadsheet,
//! and long-polls Telegram until killed.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use posyandu_store_sheets::{ServiceAccountKey, SheetStore, SheetsClient};
use posyandu_telegram::{BotConfig, telegram::TelegramClient};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Posyandu Telegram bot")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("POSYANDU"))
    .build()
    .context("failed to read configuration")?;

  let bot_config: BotConfig = settings
    .try_deserialize()
    .context("failed to deserialise BotConfig")?;

  let key = ServiceAccountKey::from_json(&bot_config.credentials_json)
    .context("failed to parse service-account credentials")?;
  let sheets = SheetsClient::new(key, bot_config.spreadsheet_id.as_str())
    .context("failed to build sheets client")?;
  let store = SheetStore::new(sheets);

  let client = TelegramClient::new(&bot_config.telegram_token)
    .context("failed to build telegram client")?;

  posyandu_telegram::run(client, store).await;
  Ok(())
}
