//! HTTP server for the Clubhouse leaderboard.
//!
//! Mounts the public and admin routers from `clubhouse-api` under `/api`,
//! puts the bearer-token gateway in front of the admin routes, and adds
//! request tracing and a body size limit.

pub mod auth;
pub mod error;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, extract::DefaultBodyLimit, middleware, routing::post};
use clubhouse_core::{ledger::Ledger, store::EventStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;

/// Largest request body accepted on any route.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CLUBHOUSE_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  #[serde(default = "default_admin_username")]
  pub admin_username:      String,
  /// Empty until an operator sets it; admin routes then answer 500.
  #[serde(default)]
  pub admin_password_hash: String,
  #[serde(default)]
  pub token_secret:        String,
  #[serde(default = "default_token_ttl_hours")]
  pub token_ttl_hours:     i64,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("clubhouse.db") }
fn default_admin_username() -> String { "admin".to_string() }
fn default_token_ttl_hours() -> i64 { 12 }

// ─── Application state ────────────────────────────────────────────────────────

pub struct AppState<S: EventStore> {
  pub ledger: Arc<Ledger<S>>,
  pub auth:   Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: EventStore + 'static,
{
  let admin = clubhouse_api::admin_router(state.ledger.clone()).route_layer(
    middleware::from_fn_with_state(state.auth.clone(), auth::require_admin),
  );

  let login = Router::new()
    .route("/admin/login", post(auth::login))
    .with_state(state.auth);

  let api = clubhouse_api::public_router(state.ledger)
    .merge(admin)
    .merge(login);

  Router::new()
    .nest("/api", api)
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .layer(TraceLayer::new_for_http())
}
