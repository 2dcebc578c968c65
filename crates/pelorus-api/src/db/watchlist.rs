//! UANI watchlist lookup.

use serde_json::Value;
use sqlx::PgPool;

use pelorus_core::Imo;
use pelorus_screening::lookup::WatchlistHit;

/// Equality lookup by IMO in `uani_watchlist`. A miss is a clean outcome,
/// not an error; query failures degrade to a miss with a warning so one
/// broken lookup cannot abort a screening.
pub async fn lookup(pool: &PgPool, imo: &Imo) -> WatchlistHit {
    let result: Result<Option<Value>, sqlx::Error> =
        sqlx::query_scalar("SELECT record FROM uani_watchlist WHERE imo = $1 LIMIT 1")
            .bind(imo.as_str())
            .fetch_optional(pool)
            .await;

    match result {
        Ok(Some(record)) => WatchlistHit::hit(record),
        Ok(None) => WatchlistHit::miss(),
        Err(e) => {
            tracing::warn!(imo = %imo, "watchlist lookup failed, treating as miss: {e}");
            WatchlistHit::miss()
        }
    }
}
