//! `clubhouse`: offline administration of a Clubhouse leaderboard database.
//!
//! # Usage
//!
//! ```text
//! clubhouse --db clubhouse.db record 2024-01 "Net Stroke Play" Alice Bob Carol
//! clubhouse standings --year 2024
//! clubhouse --config ~/.config/clubhouse/config.toml export -o backup.json
//! ```

mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use clubhouse_core::ledger::Ledger;
use clubhouse_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use commands::Command;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "clubhouse", about = "Manage a Clubhouse leaderboard database")]
struct Args {
  /// Path to a TOML config file (store_path).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// SQLite database file (default: clubhouse.db).
  #[arg(long, env = "CLUBHOUSE_DB", global = true)]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file. Shares `store_path` with the
/// server's config so one file can serve both.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  store_path: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<ConfigFile> {
  let Some(path) = path else {
    return Ok(ConfigFile::default());
  };
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading config file {}", path.display()))?;
  toml::from_str(&raw).context("parsing config file")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so command output stays pipeable.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let file_cfg = load_config(args.config.as_deref())?;

  // Flag or env overrides config file, which overrides the default.
  let db = args
    .db
    .or(file_cfg.store_path)
    .unwrap_or_else(|| PathBuf::from("clubhouse.db"));

  tracing::debug!(db = %db.display(), "opening ledger");
  let store = SqliteStore::open(&db)
    .await
    .with_context(|| format!("opening database {}", db.display()))?;
  let ledger = Ledger::new(store);

  let output = commands::run(args.command, &ledger).await?;
  print!("{output}");
  Ok(())
}
