//! High-risk country table lookup.

use sqlx::PgPool;

/// Whether a country appears in the high-risk table, matching either the
/// English or the local name case-insensitively. Empty input and query
/// failures are not high-risk.
pub async fn is_high_risk(pool: &PgPool, country: &str) -> bool {
    let needle = country.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }

    let result: Result<Option<i32>, sqlx::Error> = sqlx::query_scalar(
        "SELECT 1 FROM high_risk_countries
         WHERE lower(country_name) = $1 OR lower(country_name_local) = $1
         LIMIT 1",
    )
    .bind(&needle)
    .fetch_optional(pool)
    .await;

    match result {
        Ok(hit) => hit.is_some(),
        Err(e) => {
            tracing::warn!(country = %country, "country lookup failed, treating as clean: {e}");
            false
        }
    }
}
