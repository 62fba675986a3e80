//! JSON REST API for the Clubhouse leaderboard.
//!
//! Exposes axum [`Router`]s backed by a [`Ledger`] over any
//! [`clubhouse_core::store::EventStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility: [`admin_router`] must be mounted behind
//! an authorization layer.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", clubhouse_api::public_router(ledger.clone())
//!   .merge(clubhouse_api::admin_router(ledger).route_layer(auth)))
//! ```

pub mod backup;
pub mod error;
pub mod events;
pub mod leaderboard;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use clubhouse_core::{ledger::Ledger, store::EventStore};

pub use error::ApiError;

/// Read-only routes, safe to expose without credentials.
pub fn public_router<S>(ledger: Arc<Ledger<S>>) -> Router<()>
where
  S: EventStore + 'static,
{
  Router::new()
    .route("/leaderboard", get(leaderboard::leaderboard::<S>))
    .route("/years", get(leaderboard::years::<S>))
    .route("/players", get(leaderboard::players::<S>))
    .route("/events", get(events::list::<S>))
    .with_state(ledger)
}

/// Mutating and bulk routes. Every route here requires the caller to have
/// been authenticated already.
pub fn admin_router<S>(ledger: Arc<Ledger<S>>) -> Router<()>
where
  S: EventStore + 'static,
{
  Router::new()
    .route("/admin/events", post(events::create::<S>))
    .route("/admin/events/{id}", delete(events::delete_one::<S>))
    .route("/admin/export", get(backup::export::<S>))
    .route("/admin/import", post(backup::import::<S>))
    .with_state(ledger)
}
