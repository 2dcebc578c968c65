//! # Verdict Aggregator
//!
//! Projects per-check outcomes onto the verdict's status fields. The
//! projections are a pure function of the verdict's embedded results:
//! re-running the aggregator on a stored verdict (as reconciliation does)
//! reproduces the statuses from the entries alone.

use pelorus_core::{OperationStatus, RiskLevel};

use crate::registry::{CheckId, Vertical};
use crate::verdict::OperationVerdict;

/// Recompute every projected status on the verdict in place.
pub fn project_statuses(verdict: &mut OperationVerdict) {
    let vertical = verdict.vertical;

    let stakeholder_levels = verdict.stakeholder_levels();
    let vessel_levels = verdict.vessel_levels();
    let fleet_levels = verdict.fleet_levels();

    let overall = RiskLevel::max_of(
        stakeholder_levels
            .iter()
            .chain(&vessel_levels)
            .chain(&fleet_levels)
            .copied(),
    );
    verdict.project_risk_status = OperationStatus::from(overall);
    verdict.vessel_risk_status = RiskLevel::max_of(vessel_levels.iter().copied());
    verdict.stakeholder_risk_status = RiskLevel::max_of(stakeholder_levels.iter().copied());

    verdict.domain_statuses.clear();
    for domain in vertical.domains() {
        let mut level = RiskLevel::None;
        for &check in domain.checks {
            if check == CheckId::DowJonesSanctions {
                // The customer domain reduces over the per-name
                // counterparty verdicts, which have no vessel-check entry.
                level = level.max(RiskLevel::max_of(
                    verdict.stakeholders.values().flatten().map(|e| e.level),
                ));
            } else if let Some(item) = verdict.vessel_checks.get(check.as_key()) {
                level = level.max(item.level);
            }
        }
        verdict.domain_statuses.insert(domain.key.to_string(), level);
    }

    // Fleet exposure folds into the fleet domain where one is defined;
    // otherwise it already raised the overall status above.
    if vertical.screens_fleet() {
        verdict
            .domain_statuses
            .insert("fleet_risk_status".to_string(), RiskLevel::max_of(fleet_levels));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::{FleetVerdict, OperatorInfo, StakeholderVerdict, VesselRiskItem};
    use chrono::Utc;
    use serde_json::{Map, Value};
    use std::collections::BTreeMap;

    fn empty_verdict(vertical: Vertical) -> OperationVerdict {
        let mut stakeholders = BTreeMap::new();
        for role in vertical.roles() {
            stakeholders.insert(role.key.to_string(), Vec::new());
        }
        OperationVerdict {
            uuid: "u".into(),
            voyage_number: String::new(),
            vertical,
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
        }
    }

    fn item(level: RiskLevel) -> VesselRiskItem {
        VesselRiskItem {
            level,
            screened_at: Utc::now(),
            change_reason: String::new(),
            changed_at: None,
            description: String::new(),
            reason: Map::new(),
            info: Value::Null,
        }
    }

    fn stakeholder(name: &str, level: RiskLevel) -> StakeholderVerdict {
        StakeholderVerdict {
            name: name.into(),
            level,
            screened_at: Utc::now(),
            change_reason: String::new(),
            changed_at: None,
            description: String::new(),
            reason: Map::new(),
            info: Value::Null,
        }
    }

    #[test]
    fn clean_verdict_projects_normal() {
        let mut verdict = empty_verdict(Vertical::StsBunkering);
        project_statuses(&mut verdict);
        assert_eq!(verdict.project_risk_status, OperationStatus::Normal);
        assert_eq!(verdict.vessel_risk_status, RiskLevel::None);
        assert_eq!(verdict.stakeholder_risk_status, RiskLevel::None);
        assert_eq!(verdict.domain_statuses["cargo_risk_status"], RiskLevel::None);
    }

    #[test]
    fn high_vessel_check_intercepts() {
        let mut verdict = empty_verdict(Vertical::StsBunkering);
        verdict
            .vessel_checks
            .insert(CheckId::LloydsSanctionsCurrent.as_key().into(), item(RiskLevel::High));
        project_statuses(&mut verdict);
        assert_eq!(verdict.project_risk_status, OperationStatus::Intercept);
        assert_eq!(verdict.vessel_risk_status, RiskLevel::High);
        assert_eq!(verdict.stakeholder_risk_status, RiskLevel::None);
    }

    #[test]
    fn medium_stakeholder_watches_without_touching_vessel_status() {
        let mut verdict = empty_verdict(Vertical::StsBunkering);
        verdict
            .stakeholders
            .get_mut("consignee")
            .unwrap()
            .push(stakeholder("Acme", RiskLevel::Medium));
        project_statuses(&mut verdict);
        assert_eq!(verdict.project_risk_status, OperationStatus::Watch);
        assert_eq!(verdict.vessel_risk_status, RiskLevel::None);
        assert_eq!(verdict.stakeholder_risk_status, RiskLevel::Medium);
        assert_eq!(verdict.domain_statuses["customer_risk_status"], RiskLevel::Medium);
    }

    #[test]
    fn overall_is_projection_of_max_level() {
        // Projection law: overall == map(max(level over all checks)).
        let mut verdict = empty_verdict(Vertical::StsBunkering);
        verdict
            .vessel_checks
            .insert(CheckId::AisGap.as_key().into(), item(RiskLevel::Medium));
        verdict
            .stakeholders
            .get_mut("charterers")
            .unwrap()
            .push(stakeholder("X", RiskLevel::High));
        project_statuses(&mut verdict);

        let max = RiskLevel::max_of(
            verdict
                .vessel_levels()
                .into_iter()
                .chain(verdict.stakeholder_levels()),
        );
        assert_eq!(verdict.project_risk_status, OperationStatus::from(max));
    }

    #[test]
    fn cargo_domain_reduces_over_named_subset() {
        let mut verdict = empty_verdict(Vertical::StsBunkering);
        verdict
            .vessel_checks
            .insert(CheckId::CargoSanction.as_key().into(), item(RiskLevel::High));
        verdict
            .vessel_checks
            .insert(CheckId::RiskyPortCall.as_key().into(), item(RiskLevel::None));
        project_statuses(&mut verdict);
        assert_eq!(verdict.domain_statuses["cargo_risk_status"], RiskLevel::High);
        assert_eq!(verdict.domain_statuses["port_risk_status"], RiskLevel::None);
    }

    #[test]
    fn fleet_levels_raise_overall_and_fleet_domain() {
        let mut verdict = empty_verdict(Vertical::VesselPurchase);
        verdict.fleet_uani.push(FleetVerdict {
            vessel_name: "Fleet One".into(),
            vessel_imo: "9700001".into(),
            level: RiskLevel::High,
            screened_at: Utc::now(),
            info: Value::Null,
        });
        project_statuses(&mut verdict);
        assert_eq!(verdict.project_risk_status, OperationStatus::Intercept);
        assert_eq!(verdict.domain_statuses["fleet_risk_status"], RiskLevel::High);
        // Fleet exposure is not a vessel-check level.
        assert_eq!(verdict.vessel_risk_status, RiskLevel::None);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let mut verdict = empty_verdict(Vertical::StsBunkering);
        verdict
            .vessel_checks
            .insert(CheckId::DarkSts.as_key().into(), item(RiskLevel::High));
        project_statuses(&mut verdict);
        let first = verdict.clone();
        project_statuses(&mut verdict);
        assert_eq!(verdict.project_risk_status, first.project_risk_status);
        assert_eq!(verdict.domain_statuses, first.domain_statuses);
    }
}
