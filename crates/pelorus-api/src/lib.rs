//! # Pelorus API
//!
//! The HTTP surface and persistence layer of the screening stack. One
//! screening endpoint per vertical, an approval-reconciliation endpoint,
//! and a health probe; a Postgres verdict store underneath.
//!
//! The heavy lifting lives elsewhere: `pelorus-intel` talks to the
//! providers, `pelorus-screening` holds the pure orchestration core.
//! This crate fetches, assembles, persists, and frames.

pub mod config;
pub mod db;
pub mod error;
pub mod orchestrate;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::AppError;
pub use state::AppState;
