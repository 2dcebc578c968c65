//! Sanctions screening store lookup (DowJones results).
//!
//! Hit-list columns may hold real JSON arrays or, in rows written by
//! older ingest paths, raw JSON strings. Everything is decoded into
//! arrays here, at the database boundary, so classification always sees
//! one representation. Historical rows are never rewritten.

use serde_json::{Map, Value};
use sqlx::PgPool;

use pelorus_core::normalized_name;
use pelorus_screening::lookup::SanctionsRow;

/// Decode a hit-list column leniently into an array.
///
/// Array → as-is; string → JSON-parse (an array parses to itself, any
/// other valid JSON becomes a one-element array); null/absent/garbage →
/// empty.
pub(crate) fn decode_hit_list(raw: Option<Value>) -> Vec<Value> {
    match raw {
        Some(Value::Array(items)) => items,
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed == "null" || trimmed == "None" {
                return Vec::new();
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(Value::Array(items)) => items,
                Ok(Value::Null) => Vec::new(),
                Ok(other) => vec![other],
                Err(_) => vec![Value::String(text)],
            }
        }
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}

#[derive(sqlx::FromRow)]
struct SanctionsScreeningRow {
    sanctions_lev: Option<String>,
    sanctions_list: Option<Value>,
    mid_sanctions_list: Option<Value>,
    no_sanctions_list: Option<Value>,
    is_san: Option<String>,
    is_sco: Option<String>,
    is_ool: Option<String>,
    is_one_year: Option<String>,
    is_sanctioned_countries: Option<String>,
    description: Option<String>,
}

/// Look up one entity by normalized name. `None` is a lookup miss
/// (classified clean); query failures also degrade to a miss with a
/// warning.
pub async fn lookup(pool: &PgPool, name: &str) -> Option<SanctionsRow> {
    let normalized = normalized_name(name);
    if normalized.is_empty() {
        return None;
    }

    let result: Result<Option<SanctionsScreeningRow>, sqlx::Error> = sqlx::query_as(
        "SELECT sanctions_lev, sanctions_list, mid_sanctions_list, no_sanctions_list,
                is_san, is_sco, is_ool, is_one_year, is_sanctioned_countries, description
         FROM sanctions_screening
         WHERE lower(entity_name) = $1
         LIMIT 1",
    )
    .bind(&normalized)
    .fetch_optional(pool)
    .await;

    let row = match result {
        Ok(row) => row?,
        Err(e) => {
            tracing::warn!(entity = %name, "sanctions lookup failed, treating as miss: {e}");
            return None;
        }
    };

    let mut flags = Map::new();
    for (key, value) in [
        ("is_san", row.is_san),
        ("is_sco", row.is_sco),
        ("is_ool", row.is_ool),
        ("is_one_year", row.is_one_year),
        ("is_sanctioned_countries", row.is_sanctioned_countries),
    ] {
        flags.insert(key.into(), Value::String(value.unwrap_or_default()));
    }

    Some(SanctionsRow {
        level_raw: row.sanctions_lev.unwrap_or_default(),
        sanctions_list: decode_hit_list(row.sanctions_list),
        mid_sanctions_list: decode_hit_list(row.mid_sanctions_list),
        no_sanctions_list: decode_hit_list(row.no_sanctions_list),
        flags,
        description: row.description.filter(|d| !d.trim().is_empty()),
    })
}
