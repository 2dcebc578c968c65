//! # Approval Reconciliation
//!
//! Replays operator approvals onto the latest stored verdict. An approval
//! names a (role, name) pair and an override level; it applies only when
//! it is newer than the entry's last change, so an approval can never
//! roll back a machine finding made after it. Reconciliation rewrites
//! entry fields and recomputes the projected statuses — it never issues
//! upstream calls; refreshing machine findings is a fresh screening.
//!
//! The change log is append-on-divergence: the caller appends a new
//! revision only when the reconciled `(role, name, level)` projection
//! differs from the latest change-log revision (or none exists yet).

use chrono::{DateTime, Utc};

use pelorus_core::RiskLevel;

use crate::aggregate;
use crate::verdict::OperationVerdict;

/// One approval event row, as loaded from the approval store.
#[derive(Debug, Clone)]
pub struct ApprovalRecord {
    /// Operation UUID the approval belongs to.
    pub uuid: String,
    /// Stakeholder role key; matched case-insensitively.
    pub role: String,
    /// Counterparty name; matched under normalization.
    pub name: String,
    /// Override level vocabulary as recorded by the approval console.
    /// Empty means the approval adjusted only reason/time.
    pub override_level: String,
    /// Operator-supplied change reason.
    pub reason: String,
    /// When the approval was granted.
    pub approved_at: DateTime<Utc>,
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The verdict with approvals applied and statuses recomputed.
    pub verdict: OperationVerdict,
    /// Approvals that matched an entry and were newer than its change.
    pub applied: usize,
    /// Approvals referencing an unknown role/name, or stale ones.
    pub skipped: usize,
    /// Whether the reconciled projection differs from the latest
    /// change-log revision (append a new revision iff true).
    pub diverged: bool,
}

/// Apply `approvals` to `latest` in ascending `approved_at` order and
/// recompute the projections.
///
/// `latest_change` is the most recent change-log revision for the same
/// UUID, used for the append-on-divergence decision.
pub fn reconcile(
    latest: OperationVerdict,
    approvals: &[ApprovalRecord],
    latest_change: Option<&OperationVerdict>,
) -> ReconcileOutcome {
    if approvals.is_empty() {
        return ReconcileOutcome {
            verdict: latest,
            applied: 0,
            skipped: 0,
            diverged: false,
        };
    }

    let mut verdict = latest;
    let mut ordered: Vec<&ApprovalRecord> = approvals.iter().collect();
    ordered.sort_by_key(|a| a.approved_at);

    let mut applied = 0usize;
    let mut skipped = 0usize;

    for approval in ordered {
        let Some(entry) = verdict.stakeholder_entry_mut(&approval.role, &approval.name) else {
            tracing::warn!(
                uuid = %approval.uuid,
                role = %approval.role,
                name = %approval.name,
                "approval references a role/name absent from the verdict; ignoring"
            );
            skipped += 1;
            continue;
        };

        // Missing change time is treated as minus infinity: the first
        // approval for an entry always applies.
        let newer = entry
            .changed_at
            .map_or(true, |changed_at| approval.approved_at > changed_at);
        if !newer {
            skipped += 1;
            continue;
        }

        let override_level = approval.override_level.trim();
        if !override_level.is_empty() {
            entry.level = RiskLevel::parse(override_level);
        }
        entry.changed_at = Some(approval.approved_at);
        if !approval.reason.is_empty() {
            entry.change_reason = approval.reason.clone();
        }
        applied += 1;
    }

    aggregate::project_statuses(&mut verdict);

    let snapshot = verdict.name_level_snapshot();
    let diverged = match latest_change {
        Some(change) => change.name_level_snapshot() != snapshot,
        None => true,
    };

    ReconcileOutcome {
        verdict,
        applied,
        skipped,
        diverged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Vertical;
    use crate::verdict::{OperatorInfo, StakeholderVerdict};
    use pelorus_core::OperationStatus;
    use serde_json::{Map, Value};
    use std::collections::BTreeMap;

    fn verdict_with(name: &str, level: RiskLevel, changed_at: Option<DateTime<Utc>>) -> OperationVerdict {
        let mut stakeholders = BTreeMap::new();
        for role in Vertical::StsBunkering.roles() {
            stakeholders.insert(role.key.to_string(), Vec::new());
        }
        stakeholders.get_mut("charterers").unwrap().push(StakeholderVerdict {
            name: name.into(),
            level,
            screened_at: Utc::now(),
            change_reason: String::new(),
            changed_at,
            description: String::new(),
            reason: Map::new(),
            info: Value::Null,
        });
        let mut verdict = OperationVerdict {
            uuid: "u-1".into(),
            voyage_number: String::new(),
            vertical: Vertical::StsBunkering,
            vessel_imo: "9842190".into(),
            vessel_name: "Test".into(),
            project_risk_status: OperationStatus::Normal,
            vessel_risk_status: RiskLevel::None,
            stakeholder_risk_status: RiskLevel::None,
            domain_statuses: BTreeMap::new(),
            stakeholders,
            vessel_checks: BTreeMap::new(),
            vessel_stakeholders_lloyd: vec![],
            vessel_stakeholders_kpler: vec![],
            fleet_lloyd: vec![],
            fleet_kpler: vec![],
            fleet_uani: vec![],
            operator: OperatorInfo::default(),
            screened_at: Utc::now(),
        };
        aggregate::project_statuses(&mut verdict);
        verdict
    }

    fn approval(role: &str, name: &str, level: &str, at: DateTime<Utc>) -> ApprovalRecord {
        ApprovalRecord {
            uuid: "u-1".into(),
            role: role.into(),
            name: name.into(),
            override_level: level.into(),
            reason: "审批通过".into(),
            approved_at: at,
        }
    }

    #[test]
    fn no_approvals_is_a_no_op() {
        let verdict = verdict_with("Acme", RiskLevel::High, None);
        let before = serde_json::to_value(&verdict).expect("before");
        let outcome = reconcile(verdict, &[], None);
        assert_eq!(outcome.applied, 0);
        assert!(!outcome.diverged);
        assert_eq!(serde_json::to_value(&outcome.verdict).expect("after"), before);
    }

    #[test]
    fn newer_approval_overturns_and_diverges() {
        let t0 = Utc::now();
        let t1 = t0 + chrono::Duration::hours(1);
        let verdict = verdict_with("Acme", RiskLevel::High, Some(t0));
        assert_eq!(verdict.project_risk_status, OperationStatus::Intercept);

        let outcome = reconcile(verdict, &[approval("charterers", "Acme", "无风险", t1)], None);
        assert_eq!(outcome.applied, 1);
        assert!(outcome.diverged);
        let entry = &outcome.verdict.stakeholders["charterers"][0];
        assert_eq!(entry.level, RiskLevel::None);
        assert_eq!(entry.changed_at, Some(t1));
        assert_eq!(entry.change_reason, "审批通过");
        // Statuses are recomputed from the overturned entry.
        assert_eq!(outcome.verdict.project_risk_status, OperationStatus::Normal);
        assert_eq!(outcome.verdict.stakeholder_risk_status, RiskLevel::None);
    }

    #[test]
    fn repeating_reconciliation_does_not_diverge_again() {
        let t0 = Utc::now();
        let t1 = t0 + chrono::Duration::hours(1);
        let verdict = verdict_with("Acme", RiskLevel::High, Some(t0));
        let approvals = [approval("charterers", "Acme", "无风险", t1)];

        let first = reconcile(verdict.clone(), &approvals, None);
        assert!(first.diverged);

        // Second run, now with the change-log revision in place.
        let second = reconcile(verdict, &approvals, Some(&first.verdict));
        assert!(!second.diverged, "identical projection must not append again");
    }

    #[test]
    fn stale_approval_is_ignored() {
        let t0 = Utc::now();
        let stale = t0 - chrono::Duration::hours(2);
        let verdict = verdict_with("Acme", RiskLevel::High, Some(t0));

        let outcome = reconcile(verdict, &[approval("charterers", "Acme", "无风险", stale)], None);
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.verdict.stakeholders["charterers"][0].level, RiskLevel::High);
    }

    #[test]
    fn missing_changed_at_is_minus_infinity() {
        let t1 = Utc::now();
        let verdict = verdict_with("Acme", RiskLevel::High, None);
        let outcome = reconcile(verdict, &[approval("charterers", "Acme", "无风险", t1)], None);
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.verdict.stakeholders["charterers"][0].level, RiskLevel::None);
    }

    #[test]
    fn unknown_role_or_name_is_skipped_not_fatal() {
        let t1 = Utc::now();
        let verdict = verdict_with("Acme", RiskLevel::High, None);
        let outcome = reconcile(
            verdict,
            &[
                approval("nonexistent_role", "Acme", "无风险", t1),
                approval("charterers", "Nobody Corp", "无风险", t1),
            ],
            None,
        );
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 2);
        assert_eq!(outcome.verdict.stakeholders["charterers"][0].level, RiskLevel::High);
    }

    #[test]
    fn role_case_and_name_whitespace_are_insensitive() {
        let t1 = Utc::now();
        let verdict = verdict_with("Acme Shipping", RiskLevel::High, None);
        let outcome = reconcile(
            verdict,
            &[approval("Charterers", "  ACME   SHIPPING ", "无风险", t1)],
            None,
        );
        assert_eq!(outcome.applied, 1);
    }

    #[test]
    fn approval_console_codes_map_to_levels() {
        let t1 = Utc::now();
        let verdict = verdict_with("Acme", RiskLevel::None, None);
        let outcome = reconcile(verdict, &[approval("charterers", "Acme", "1", t1)], None);
        assert_eq!(outcome.verdict.stakeholders["charterers"][0].level, RiskLevel::High);
    }

    #[test]
    fn batch_application_equals_one_at_a_time() {
        let t0 = Utc::now();
        let t1 = t0 + chrono::Duration::hours(1);
        let t2 = t0 + chrono::Duration::hours(2);
        let verdict = verdict_with("Acme", RiskLevel::High, Some(t0));
        let a1 = approval("charterers", "Acme", "无风险", t1);
        let a2 = approval("charterers", "Acme", "中风险", t2);

        // All at once.
        let batch = reconcile(verdict.clone(), &[a1.clone(), a2.clone()], None);

        // One at a time, in ascending order.
        let step1 = reconcile(verdict, &[a1], None);
        let step2 = reconcile(step1.verdict, &[a2], None);

        assert_eq!(
            serde_json::to_value(&batch.verdict).expect("batch"),
            serde_json::to_value(&step2.verdict).expect("stepwise")
        );
        assert_eq!(
            batch.verdict.stakeholders["charterers"][0].level,
            RiskLevel::Medium
        );
    }

    #[test]
    fn application_order_is_timestamp_order_not_input_order() {
        let t0 = Utc::now();
        let t1 = t0 + chrono::Duration::hours(1);
        let t2 = t0 + chrono::Duration::hours(2);
        let verdict = verdict_with("Acme", RiskLevel::High, Some(t0));
        let earlier = approval("charterers", "Acme", "无风险", t1);
        let later = approval("charterers", "Acme", "中风险", t2);

        // Input order reversed: the later timestamp still wins.
        let outcome = reconcile(verdict, &[later, earlier], None);
        assert_eq!(
            outcome.verdict.stakeholders["charterers"][0].level,
            RiskLevel::Medium
        );
        assert_eq!(
            outcome.verdict.stakeholders["charterers"][0].changed_at,
            Some(t2)
        );
    }

    #[test]
    fn empty_override_level_updates_only_reason_and_time() {
        let t1 = Utc::now();
        let verdict = verdict_with("Acme", RiskLevel::High, None);
        let mut record = approval("charterers", "Acme", "", t1);
        record.reason = "等待补充材料".into();
        let outcome = reconcile(verdict, &[record], None);
        let entry = &outcome.verdict.stakeholders["charterers"][0];
        assert_eq!(entry.level, RiskLevel::High);
        assert_eq!(entry.changed_at, Some(t1));
        assert_eq!(entry.change_reason, "等待补充材料");
    }
}
