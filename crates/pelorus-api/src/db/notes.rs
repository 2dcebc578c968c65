//! Per-check risk-note descriptions.
//!
//! The `risk_notes` table maps (check kind, risk level) to the operator-
//! facing description and optional info payload shown on verdict items.
//! Loaded once per screening; a missing table or failed query degrades to
//! the registry's built-in descriptions.

use std::collections::BTreeMap;

use serde_json::Value;
use sqlx::PgPool;

use pelorus_screening::lookup::RiskNote;

#[derive(sqlx::FromRow)]
struct NoteRow {
    check_kind: String,
    risk_level: String,
    description: String,
    info: Option<Value>,
}

/// Load all notes keyed by `"<check_key>:<level>"` (the session's
/// `note_key` format).
pub async fn load_all(pool: &PgPool) -> BTreeMap<String, RiskNote> {
    let rows: Vec<NoteRow> = match sqlx::query_as(
        "SELECT check_kind, risk_level, description, info FROM risk_notes",
    )
    .fetch_all(pool)
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("risk notes unavailable, using built-in descriptions: {e}");
            return BTreeMap::new();
        }
    };

    rows.into_iter()
        .map(|row| {
            (
                format!("{}:{}", row.check_kind, row.risk_level),
                RiskNote {
                    description: row.description,
                    info: row.info,
                },
            )
        })
        .collect()
}
