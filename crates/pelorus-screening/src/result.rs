//! # Check Results
//!
//! The immutable record one check evaluation produces. A result exists
//! only within one screening session; it is folded into the assembled
//! verdict and never stored on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use pelorus_core::RiskLevel;

use crate::registry::{descriptor, CheckId};

/// Outcome of one check against one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Which check produced this result.
    pub check: CheckId,
    /// Subject identifier: IMO, normalized entity name, or country name.
    pub subject: String,
    /// Classified risk level.
    pub level: RiskLevel,
    /// When the classification was made.
    pub screened_at: DateTime<Utc>,
    /// Short human description.
    pub description: String,
    /// Raw evidence payloads (provider records, verbatim).
    pub evidence: Vec<Value>,
    /// Structured reason map (hit lists, flags, error notes).
    pub reason: Map<String, Value>,
}

impl CheckResult {
    /// A clean result with no findings.
    pub fn clean(check: CheckId, subject: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            check,
            subject: subject.into(),
            level: RiskLevel::None,
            screened_at: now,
            description: descriptor(check).description.to_string(),
            evidence: Vec::new(),
            reason: Map::new(),
        }
    }

    /// A result recording an upstream failure: the check classifies as
    /// no-risk but the error is preserved in the reason map so the verdict
    /// shows why the data was missing.
    pub fn upstream_failed(
        check: CheckId,
        subject: impl Into<String>,
        now: DateTime<Utc>,
        error: &str,
    ) -> Self {
        let mut result = Self::clean(check, subject, now);
        result.reason.insert("error".into(), Value::String(error.to_string()));
        result
    }

    /// Set the level, keeping everything else.
    pub fn with_level(mut self, level: RiskLevel) -> Self {
        self.level = level;
        self
    }

    /// Append one raw evidence payload.
    pub fn push_evidence(&mut self, payload: Value) {
        self.evidence.push(payload);
    }

    /// Insert one reason entry.
    pub fn note_reason(&mut self, key: &str, value: Value) {
        self.reason.insert(key.to_string(), value);
    }
}
