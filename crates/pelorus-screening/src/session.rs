//! # Screening Session Core
//!
//! Turns one normalized screening request plus its fetched inputs into an
//! assembled [`OperationVerdict`]. This is the pure half of the
//! orchestrator: the I/O layer prefetches provider data and store lookups
//! into a [`ScreeningInputs`], and everything from here on is
//! deterministic — same inputs, same verdict (up to the supplied clock).
//!
//! Responsibilities:
//! - evaluate every check the vertical lists, atomics first, composites
//!   over the atomic result set;
//! - screen each request-supplied counterparty name per role, preserving
//!   request order, with empty input lists yielding empty arrays;
//! - diff levels against the previous verdict for the same operation to
//!   maintain the `changed_at` contract;
//! - screen supplied fleet vessels per provider;
//! - project the verdict statuses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use pelorus_core::{normalized_name, Imo, OperationStatus, RiskLevel};
use pelorus_intel::VesselIntel;

use crate::aggregate;
use crate::composite;
use crate::evaluators;
use crate::lookup::{RiskNote, SanctionsRow, WatchlistHit};
use crate::registry::{descriptor, CheckId, CheckKind, Vertical};
use crate::result::CheckResult;
use crate::verdict::{
    FleetVerdict, OperationVerdict, OperatorInfo, StakeholderVerdict, VesselRiskItem,
};

/// A fleet vessel reference supplied on the request.
#[derive(Debug, Clone)]
pub struct FleetVesselRef {
    /// Supplied vessel name.
    pub name: String,
    /// Supplied IMO, when it validated.
    pub imo: Option<Imo>,
}

/// Normalized screening request, common to every vertical.
#[derive(Debug, Clone)]
pub struct ScreeningRequest {
    /// The vertical being screened.
    pub vertical: Vertical,
    /// Operation UUID.
    pub uuid: String,
    /// Business number / process id.
    pub voyage_number: String,
    /// Subject vessel, when the request carried a valid IMO.
    pub vessel_imo: Option<Imo>,
    /// Subject vessel name.
    pub vessel_name: String,
    /// Cargo origin country, when supplied.
    pub cargo_origin: Option<String>,
    /// Operating / berthing country, when supplied.
    pub port_country: Option<String>,
    /// Role key → counterparty names, in request order. Every role of
    /// the vertical appears here, possibly with an empty list.
    pub roles: Vec<(String, Vec<String>)>,
    /// Supplied fleet vessels (purchase / disposal verticals).
    pub fleet: Vec<FleetVesselRef>,
    /// Operator metadata to echo.
    pub operator: OperatorInfo,
}

/// Fetched inputs for one fleet vessel.
#[derive(Debug, Clone)]
pub struct FleetInputs {
    /// The fleet vessel reference from the request.
    pub vessel: FleetVesselRef,
    /// Prefetched provider data (sanctions and bulk-risk slots matter).
    pub intel: VesselIntel,
    /// Watchlist lookup outcome.
    pub watchlist: WatchlistHit,
}

/// Everything the session needs, fetched up front by the I/O layer.
#[derive(Debug, Clone)]
pub struct ScreeningInputs {
    /// Prefetched provider data for the subject vessel.
    pub intel: VesselIntel,
    /// Watchlist lookup for the subject vessel.
    pub watchlist: WatchlistHit,
    /// Sanctions-store rows keyed by normalized counterparty name.
    /// Missing names are lookup misses (clean).
    pub sanctions_rows: BTreeMap<String, SanctionsRow>,
    /// Whether the cargo origin country is in the high-risk table.
    pub cargo_origin_high_risk: bool,
    /// Whether the port country is in the high-risk table.
    pub port_high_risk: bool,
    /// The latest prior verdict for this operation UUID, if any.
    pub previous: Option<OperationVerdict>,
    /// Risk-note descriptions keyed by `"<check_key>:<level>"`.
    pub notes: BTreeMap<String, RiskNote>,
    /// Per-fleet-vessel inputs, in request order.
    pub fleet: Vec<FleetInputs>,
}

impl ScreeningInputs {
    /// Inputs with nothing fetched — every check will come back clean.
    pub fn empty(intel: VesselIntel) -> Self {
        Self {
            intel,
            watchlist: WatchlistHit::miss(),
            sanctions_rows: BTreeMap::new(),
            cargo_origin_high_risk: false,
            port_high_risk: false,
            previous: None,
            notes: BTreeMap::new(),
            fleet: Vec::new(),
        }
    }

    fn note_for(&self, check: CheckId, level: RiskLevel) -> Option<&RiskNote> {
        self.notes.get(&note_key(check, level))
    }
}

/// Key for the risk-note table: check key plus classified level.
pub fn note_key(check: CheckId, level: RiskLevel) -> String {
    format!("{}:{}", check.as_key(), level.as_str())
}

/// Run the pure screening core and assemble the verdict.
pub fn run_screening(
    request: &ScreeningRequest,
    inputs: &ScreeningInputs,
    now: DateTime<Utc>,
) -> OperationVerdict {
    let vertical = request.vertical;
    let subject = request
        .vessel_imo
        .as_ref()
        .map(Imo::to_string)
        .unwrap_or_default();

    // Atomic checks first.
    let mut results: BTreeMap<CheckId, CheckResult> = BTreeMap::new();
    let mut screenings_lloyd = Vec::new();
    let mut screenings_kpler = Vec::new();
    for &check in vertical.checks() {
        let result = match check {
            CheckId::StakeholderScreeningLloyds => {
                let (result, entries) = evaluators::stakeholder_screening_lloyds(&inputs.intel, now);
                screenings_lloyd = entries;
                result
            }
            CheckId::StakeholderScreeningKpler => {
                let (result, entries) = evaluators::stakeholder_screening_kpler(&inputs.intel, now);
                screenings_kpler = entries;
                result
            }
            CheckId::CargoOriginCountry => evaluators::country_membership(
                check,
                request.cargo_origin.as_deref(),
                inputs.cargo_origin_high_risk,
                now,
            ),
            CheckId::PortCountry => evaluators::country_membership(
                check,
                request.port_country.as_deref(),
                inputs.port_high_risk,
                now,
            ),
            _ => {
                if matches!(descriptor(check).kind, CheckKind::Composite { .. }) {
                    continue;
                }
                match evaluators::evaluate_vessel_check(check, &inputs.intel, &inputs.watchlist, now)
                {
                    Some(result) => result,
                    None => continue,
                }
            }
        };
        results.insert(check, result);
    }

    // Composites over the atomic result set.
    let composites: Vec<(CheckId, CheckResult)> = vertical
        .checks()
        .iter()
        .filter(|&&check| matches!(descriptor(check).kind, CheckKind::Composite { .. }))
        .map(|&check| (check, composite::compose(check, &results, &subject, now)))
        .collect();
    results.extend(composites);

    // Vessel check items, with change diffing against the prior verdict.
    let mut vessel_checks = BTreeMap::new();
    for &check in vertical.checks() {
        let Some(result) = results.get(&check) else {
            continue;
        };
        let mut item = vessel_item(result, inputs.note_for(check, result.level));
        if let Some(previous) = inputs
            .previous
            .as_ref()
            .and_then(|p| p.vessel_checks.get(check.as_key()))
        {
            if previous.level == item.level {
                item.changed_at = previous.changed_at;
                item.change_reason = previous.change_reason.clone();
            } else {
                item.changed_at = Some(now);
            }
        }
        vessel_checks.insert(check.as_key().to_string(), item);
    }

    // Counterparty screening per role, request order preserved.
    let mut stakeholders: BTreeMap<String, Vec<StakeholderVerdict>> = BTreeMap::new();
    for (role, names) in &request.roles {
        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                continue;
            }
            let row = inputs.sanctions_rows.get(&normalized_name(trimmed));
            let result = evaluators::dowjones_sanctions(trimmed, row, now);
            let mut entry = stakeholder_verdict(
                trimmed,
                &result,
                inputs.note_for(CheckId::DowJonesSanctions, result.level),
            );
            if let Some(previous) = inputs
                .previous
                .as_ref()
                .and_then(|p| p.stakeholder_entry(role, trimmed))
            {
                if previous.level == entry.level {
                    entry.changed_at = previous.changed_at;
                    entry.change_reason = previous.change_reason.clone();
                } else {
                    entry.changed_at = Some(now);
                }
            }
            entries.push(entry);
        }
        stakeholders.insert(role.clone(), entries);
    }

    // Supplied fleet, one entry per vessel per provider view.
    let mut fleet_lloyd = Vec::new();
    let mut fleet_kpler = Vec::new();
    let mut fleet_uani = Vec::new();
    for fleet in &inputs.fleet {
        let imo_text = fleet
            .vessel
            .imo
            .as_ref()
            .map(Imo::to_string)
            .unwrap_or_default();
        let lloyd = evaluators::lloyds_sanctions_current(&fleet.intel, now);
        let kpler = evaluators::kpler_risk_level(&fleet.intel, now);
        let uani = evaluators::watchlist_membership(fleet.vessel.imo.as_ref(), &fleet.watchlist, now);
        fleet_lloyd.push(fleet_verdict(&fleet.vessel.name, &imo_text, &lloyd, now));
        fleet_kpler.push(fleet_verdict(&fleet.vessel.name, &imo_text, &kpler, now));
        fleet_uani.push(fleet_verdict(&fleet.vessel.name, &imo_text, &uani, now));
    }

    let mut verdict = OperationVerdict {
        uuid: request.uuid.clone(),
        voyage_number: request.voyage_number.clone(),
        vertical,
        vessel_imo: subject,
        vessel_name: request.vessel_name.trim().to_string(),
        project_risk_status: OperationStatus::Normal,
        vessel_risk_status: RiskLevel::None,
        stakeholder_risk_status: RiskLevel::None,
        domain_statuses: BTreeMap::new(),
        stakeholders,
        vessel_checks,
        vessel_stakeholders_lloyd: screenings_lloyd,
        vessel_stakeholders_kpler: screenings_kpler,
        fleet_lloyd,
        fleet_kpler,
        fleet_uani,
        operator: request.operator.clone(),
        screened_at: now,
    };

    aggregate::project_statuses(&mut verdict);
    verdict
}

fn vessel_item(result: &CheckResult, note: Option<&RiskNote>) -> VesselRiskItem {
    VesselRiskItem {
        level: result.level,
        screened_at: result.screened_at,
        change_reason: String::new(),
        changed_at: None,
        description: note
            .map(|n| n.description.clone())
            .unwrap_or_else(|| result.description.clone()),
        reason: result.reason.clone(),
        info: if result.evidence.is_empty() {
            note.and_then(|n| n.info.clone()).unwrap_or(Value::Null)
        } else {
            Value::Array(result.evidence.clone())
        },
    }
}

fn stakeholder_verdict(
    name: &str,
    result: &CheckResult,
    note: Option<&RiskNote>,
) -> StakeholderVerdict {
    StakeholderVerdict {
        name: name.to_string(),
        level: result.level,
        screened_at: result.screened_at,
        change_reason: String::new(),
        changed_at: None,
        description: note
            .map(|n| n.description.clone())
            .unwrap_or_else(|| result.description.clone()),
        reason: result.reason.clone(),
        info: note.and_then(|n| n.info.clone()).unwrap_or(Value::Null),
    }
}

fn fleet_verdict(
    name: &str,
    imo: &str,
    result: &CheckResult,
    now: DateTime<Utc>,
) -> FleetVerdict {
    FleetVerdict {
        vessel_name: name.to_string(),
        vessel_imo: imo.to_string(),
        level: result.level,
        screened_at: now,
        info: if result.evidence.is_empty() {
            Value::Null
        } else {
            Value::Array(result.evidence.clone())
        },
    }
}
