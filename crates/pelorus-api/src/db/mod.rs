//! # Database Persistence Layer
//!
//! Postgres persistence via SQLx. Two kinds of tables:
//!
//! **Write side (append-only)** — the primary verdict log, the change log
//! written by approval reconciliation, and the approval records. There
//! are no updates or deletes during normal operation; a revision is a new
//! row.
//!
//! **Read side** — the UANI watchlist, the sanctions screening store
//! (DowJones results), the high-risk country table, and per-check risk
//! notes. These are maintained by separate ingest jobs; this service only
//! queries them.

pub mod approvals;
pub mod countries;
pub mod notes;
pub mod sanctions;
pub mod verdicts;
pub mod watchlist;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Connect the process-wide pool.
///
/// The database must be reachable on first attempt — a screening service
/// that cannot persist verdicts must not come up.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await?;
    tracing::info!("connected to PostgreSQL");
    Ok(pool)
}
