//! clubhouse-server binary.
//!
//! Loads [`ServerConfig`] from an optional TOML file overlaid with
//! `CLUBHOUSE_*` environment variables, opens the SQLite ledger, and serves
//! the leaderboard API.
//!
//! Run with `--hash-password` to turn a password read from stdin into the
//! argon2 PHC string expected in `admin_password_hash`.

use std::{
  io::{self, BufRead, Write},
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use clubhouse_core::ledger::Ledger;
use clubhouse_server::{AppState, ServerConfig, auth::AuthConfig};
use clubhouse_store_sqlite::SqliteStore;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Serve the Clubhouse leaderboard API")]
struct Cli {
  /// TOML settings file; missing is fine, environment variables still apply.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Hash an admin password from stdin for `admin_password_hash`, then exit.
  #[arg(long)]
  hash_password: bool,
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
  if cli.hash_password {
    println!("{}", admin_password_hash()?);
    return Ok(());
  }

  let server_cfg: ServerConfig = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CLUBHOUSE"))
    .build()
    .and_then(config::Config::try_deserialize)
    .context("failed to load server configuration")?;

  let auth = AuthConfig::try_from(&server_cfg).context("invalid token_ttl_hours")?;
  if auth.token_secret.is_empty() || auth.password_hash.is_empty() {
    tracing::warn!("token_secret or admin_password_hash unset; admin routes will answer 500");
  }

  let store_path = home_relative(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open ledger database {}", store_path.display()))?;
  tracing::info!(path = %store_path.display(), "ledger opened");

  let app = clubhouse_server::router(AppState {
    ledger: Arc::new(Ledger::new(store)),
    auth:   Arc::new(auth),
  });

  let address = (server_cfg.host.as_str(), server_cfg.port);
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {}:{}", address.0, address.1))?;
  tracing::info!(addr = %listener.local_addr()?, "serving leaderboard");

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}

/// Prompt for a password on stdout, read one line from stdin, and hash it.
fn admin_password_hash() -> anyhow::Result<String> {
  print!("Admin password: ");
  io::stdout().flush().ok();

  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  let password = line.trim_end_matches(['\n', '\r']);
  anyhow::ensure!(!password.is_empty(), "refusing to hash an empty password");

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))
}

/// `~/clubhouse.db` style paths resolve against `$HOME`; others are kept.
fn home_relative(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
