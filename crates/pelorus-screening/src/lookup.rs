//! # Local Store Lookup Shapes
//!
//! Results of the local datastore lookups the evaluators classify on:
//! the UANI watchlist, the sanctions screening store (DowJones), the
//! high-risk country table, and per-check risk notes. The I/O layer fills
//! these; evaluators never query anything themselves.

use serde_json::{Map, Value};

use pelorus_core::RiskLevel;

/// Outcome of a watchlist (UANI) lookup by IMO.
#[derive(Debug, Clone, Default)]
pub struct WatchlistHit {
    /// Whether the vessel appears in the watchlist.
    pub found: bool,
    /// The stored record, when found.
    pub record: Option<Value>,
}

impl WatchlistHit {
    /// A miss.
    pub fn miss() -> Self {
        Self::default()
    }

    /// A hit with the stored record.
    pub fn hit(record: Value) -> Self {
        Self {
            found: true,
            record: Some(record),
        }
    }
}

/// One row from the sanctions screening store for an entity name.
///
/// Hit-list columns are always decoded into arrays before they reach an
/// evaluator: rows written by older ingest paths stored them as raw JSON
/// strings, and the lenient decode happens at the database boundary.
#[derive(Debug, Clone, Default)]
pub struct SanctionsRow {
    /// Stored risk level vocabulary, mapped via [`RiskLevel::parse`].
    pub level_raw: String,
    /// High-risk hit list.
    pub sanctions_list: Vec<Value>,
    /// Medium-risk hit list.
    pub mid_sanctions_list: Vec<Value>,
    /// No-risk hit list.
    pub no_sanctions_list: Vec<Value>,
    /// Screening flags (`is_san`, `is_sco`, `is_ool`, `is_one_year`,
    /// `is_sanctioned_countries`), verbatim.
    pub flags: Map<String, Value>,
    /// Structured description, when the store carries one.
    pub description: Option<String>,
}

impl SanctionsRow {
    /// The stored level mapped onto the ordered vocabulary.
    pub fn level(&self) -> RiskLevel {
        RiskLevel::parse(&self.level_raw)
    }
}

/// A per-check, per-level human description note.
#[derive(Debug, Clone)]
pub struct RiskNote {
    /// Description text shown on the verdict item.
    pub description: String,
    /// Optional structured info payload.
    pub info: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanctions_row_level_maps_vocabulary() {
        let row = SanctionsRow {
            level_raw: "高风险".into(),
            ..Default::default()
        };
        assert_eq!(row.level(), RiskLevel::High);

        let row = SanctionsRow {
            level_raw: "unknown-label".into(),
            ..Default::default()
        };
        assert_eq!(row.level(), RiskLevel::None);
    }

    #[test]
    fn watchlist_constructors() {
        assert!(!WatchlistHit::miss().found);
        let hit = WatchlistHit::hit(json!({"vessel_name": "X"}));
        assert!(hit.found);
        assert!(hit.record.is_some());
    }
}
