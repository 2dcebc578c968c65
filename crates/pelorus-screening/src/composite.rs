//! # Composite Evaluator
//!
//! Reduces child check results into a composite verdict. The reduction is
//! max severity over the `none < medium < high` order; evidence is the
//! union of the children's evidence with each entry tagged by its source
//! check. Composites never perform I/O and never re-evaluate children:
//! they read the session's result set through a registry lookup, which
//! also rules out recursive re-orchestration.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use pelorus_core::RiskLevel;

use crate::registry::{descriptor, CheckId, CheckKind};
use crate::result::CheckResult;

/// Evaluate one composite from the already-evaluated result set.
///
/// A child missing from `results` contributes no-risk and no evidence;
/// the invariant that every vertical runs a composite's children is
/// enforced by the registry tests, so a miss here only happens for
/// subjects that had no input at all.
pub fn compose(
    check: CheckId,
    results: &BTreeMap<CheckId, CheckResult>,
    subject: &str,
    now: DateTime<Utc>,
) -> CheckResult {
    let CheckKind::Composite { children } = descriptor(check).kind else {
        // Atomic ids pass through untouched if present.
        return results
            .get(&check)
            .cloned()
            .unwrap_or_else(|| CheckResult::clean(check, subject, now));
    };

    let mut composite = CheckResult::clean(check, subject, now);
    let mut level = RiskLevel::None;
    let mut child_levels = serde_json::Map::new();

    for &child in children {
        let Some(result) = results.get(&child) else {
            child_levels.insert(child.as_key().into(), json!(RiskLevel::None.as_str()));
            continue;
        };
        level = level.max(result.level);
        child_levels.insert(child.as_key().into(), json!(result.level.as_str()));
        for payload in &result.evidence {
            composite.push_evidence(json!({
                "source": child.as_key(),
                "record": payload,
            }));
        }
        if let Some(error) = result.reason.get("error") {
            composite.note_reason(&format!("{}_error", child.as_key()), error.clone());
        }
    }

    composite.note_reason("children", Value::Object(child_levels));
    composite.with_level(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(check: CheckId, level: RiskLevel, evidence: Vec<Value>) -> CheckResult {
        let mut result = CheckResult::clean(check, "9842190", Utc::now());
        result.evidence = evidence;
        result.with_level(level)
    }

    #[test]
    fn composite_level_is_max_of_children() {
        let mut results = BTreeMap::new();
        results.insert(
            CheckId::LloydsAisGap,
            result_with(CheckId::LloydsAisGap, RiskLevel::Medium, vec![json!({"gap": 1})]),
        );
        results.insert(
            CheckId::KplerAisGap,
            result_with(CheckId::KplerAisGap, RiskLevel::None, vec![]),
        );

        let composite = compose(CheckId::AisGap, &results, "9842190", Utc::now());
        assert_eq!(composite.level, RiskLevel::Medium);
    }

    #[test]
    fn composite_evidence_is_tagged_union() {
        let mut results = BTreeMap::new();
        results.insert(
            CheckId::LloydsAisGap,
            result_with(CheckId::LloydsAisGap, RiskLevel::Medium, vec![json!({"gap": "a"})]),
        );
        results.insert(
            CheckId::KplerAisGap,
            result_with(CheckId::KplerAisGap, RiskLevel::Medium, vec![json!({"gap": "b"})]),
        );

        let composite = compose(CheckId::AisGap, &results, "9842190", Utc::now());
        assert_eq!(composite.evidence.len(), 2);
        assert_eq!(composite.evidence[0]["source"], json!("vessel_ais_gap_lloyd"));
        assert_eq!(composite.evidence[1]["source"], json!("vessel_ais_gap_kpler"));
        assert_eq!(composite.reason["children"]["vessel_ais_gap_lloyd"], json!("中风险"));
    }

    #[test]
    fn missing_children_contribute_none() {
        let results = BTreeMap::new();
        let composite = compose(CheckId::AisGap, &results, "9842190", Utc::now());
        assert_eq!(composite.level, RiskLevel::None);
        assert!(composite.evidence.is_empty());
    }

    #[test]
    fn sts_transfer_reduces_sanctioned_sts_and_loitering() {
        let mut results = BTreeMap::new();
        results.insert(
            CheckId::SanctionedSts,
            result_with(CheckId::SanctionedSts, RiskLevel::High, vec![json!({"e": 1})]),
        );
        results.insert(
            CheckId::Loitering,
            result_with(CheckId::Loitering, RiskLevel::Medium, vec![]),
        );
        let composite = compose(CheckId::StsTransfer, &results, "9842190", Utc::now());
        assert_eq!(composite.level, RiskLevel::High);
    }

    #[test]
    fn child_errors_surface_in_composite_reason() {
        let mut results = BTreeMap::new();
        results.insert(
            CheckId::LloydsAisGap,
            CheckResult::upstream_failed(CheckId::LloydsAisGap, "9842190", Utc::now(), "timeout"),
        );
        let composite = compose(CheckId::AisGap, &results, "9842190", Utc::now());
        assert_eq!(composite.level, RiskLevel::None);
        assert_eq!(composite.reason["vessel_ais_gap_lloyd_error"], json!("timeout"));
    }
}
