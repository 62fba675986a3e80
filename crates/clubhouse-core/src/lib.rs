//! Core types and trait definitions for the Clubhouse leaderboard.
//!
//! No HTTP or database dependencies live here. The crate owns the event
//! model, the scoring policy, the ranking computation, and the
//! [`ledger::Ledger`] that enforces the one-result-set-per-month rule on top
//! of any [`store::EventStore`] backend.

// Store impls use native `async fn`; the trait spells out `Send` futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod event;
pub mod ledger;
pub mod memory;
pub mod rankings;
pub mod scoring;
pub mod snapshot;
pub mod store;
pub mod year;

pub use error::{Error, Result};
