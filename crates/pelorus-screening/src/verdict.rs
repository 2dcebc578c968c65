//! # Assembled Verdicts
//!
//! The records a screening session produces and the verdict store
//! persists. One [`StakeholderVerdict`] shape serves every role; per-role
//! differences are only the key the entries sit under in the verdict's
//! role map. Wire field names follow the established verdict JSON
//! contract (`risk_screening_status`, `risk_status_change_time`, ...).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use pelorus_core::{normalized_name, OperationStatus, RiskLevel};

use crate::registry::Vertical;

/// Verdict for one named counterparty under one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeholderVerdict {
    /// Counterparty name as supplied in the request.
    pub name: String,
    /// Classified risk level.
    #[serde(rename = "risk_screening_status")]
    pub level: RiskLevel,
    /// When the classification was made.
    #[serde(rename = "risk_screening_time")]
    pub screened_at: DateTime<Utc>,
    /// Reason text for the last status change (operator or machine).
    #[serde(rename = "risk_status_change_content", default)]
    pub change_reason: String,
    /// When the classification last changed for this (uuid, role, name).
    /// Unset until a change is observed.
    #[serde(rename = "risk_status_change_time", default)]
    pub changed_at: Option<DateTime<Utc>>,
    /// Human description of the finding.
    #[serde(rename = "risk_description", default)]
    pub description: String,
    /// Structured reason map (hit lists, flags).
    #[serde(rename = "risk_status_reason", default)]
    pub reason: Map<String, Value>,
    /// Detail payload shown to operators.
    #[serde(rename = "risk_info", default)]
    pub info: Value,
}

/// Verdict for one vessel-level check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselRiskItem {
    /// Classified risk level.
    #[serde(rename = "risk_screening_status")]
    pub level: RiskLevel,
    /// When the classification was made.
    #[serde(rename = "risk_screening_time")]
    pub screened_at: DateTime<Utc>,
    /// Reason text for the last status change.
    #[serde(rename = "risk_status_change_content", default)]
    pub change_reason: String,
    /// When the classification last changed for this (uuid, check).
    #[serde(rename = "risk_status_change_time", default)]
    pub changed_at: Option<DateTime<Utc>>,
    /// Human description of the finding.
    #[serde(rename = "risk_description", default)]
    pub description: String,
    /// Structured reason map.
    #[serde(rename = "risk_status_reason", default)]
    pub reason: Map<String, Value>,
    /// Raw evidence payloads.
    #[serde(rename = "risk_info", default)]
    pub info: Value,
}

/// One entry of a vessel stakeholder screening (provider-reported
/// stakeholders, as opposed to request-supplied counterparties).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeholderScreening {
    /// Relation of the stakeholder to the vessel.
    #[serde(rename = "Vessel_stakeholder_type", default)]
    pub stakeholder_type: String,
    /// Stakeholder name.
    pub name: String,
    /// Classified risk level.
    #[serde(rename = "risk_screening_status")]
    pub level: RiskLevel,
    /// When the classification was made.
    #[serde(rename = "risk_screening_time")]
    pub screened_at: DateTime<Utc>,
    /// Raw provider record.
    #[serde(rename = "risk_info", default)]
    pub evidence: Value,
}

/// Per-vessel screening entry of a supplied fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetVerdict {
    /// Fleet vessel name, as supplied.
    pub vessel_name: String,
    /// Fleet vessel IMO, as supplied.
    pub vessel_imo: String,
    /// Classified risk level.
    #[serde(rename = "risk_screening_status")]
    pub level: RiskLevel,
    /// When the classification was made.
    #[serde(rename = "risk_screening_time")]
    pub screened_at: DateTime<Utc>,
    /// Raw evidence payload.
    #[serde(rename = "risk_info", default)]
    pub info: Value,
}

/// Operator metadata echoed on the verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatorInfo {
    /// Operator account id.
    #[serde(default)]
    pub operator_id: String,
    /// Operator display name.
    #[serde(default)]
    pub operator_name: String,
    /// Operator department.
    #[serde(default)]
    pub operator_department: String,
    /// Operator-supplied timestamp string.
    #[serde(default)]
    pub operator_time: String,
}

/// The full assembled verdict for one screening call.
///
/// Appended to the primary verdict log as a JSON document plus projected
/// columns; never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationVerdict {
    /// Operation UUID.
    pub uuid: String,
    /// Business number / process id of the operation.
    #[serde(default)]
    pub voyage_number: String,
    /// Which vertical produced this verdict.
    pub vertical: Vertical,
    /// Subject vessel IMO (empty when the request carried none).
    #[serde(default)]
    pub vessel_imo: String,
    /// Subject vessel name.
    #[serde(default)]
    pub vessel_name: String,
    /// Operation-level projected status.
    pub project_risk_status: OperationStatus,
    /// Vessel projected status.
    pub vessel_risk_status: RiskLevel,
    /// Stakeholder projected status.
    pub stakeholder_risk_status: RiskLevel,
    /// Domain sub-statuses (varies by vertical).
    #[serde(default)]
    pub domain_statuses: BTreeMap<String, RiskLevel>,
    /// Per-role stakeholder verdicts. Every role of the vertical has a
    /// key here; an empty input list yields an empty array, never a
    /// missing key.
    #[serde(default)]
    pub stakeholders: BTreeMap<String, Vec<StakeholderVerdict>>,
    /// Per-check vessel risk items, keyed by registry check key.
    #[serde(default)]
    pub vessel_checks: BTreeMap<String, VesselRiskItem>,
    /// Intelligence-A vessel stakeholder screening.
    #[serde(rename = "vessel_stakeholder_is_sanction_lloyd", default)]
    pub vessel_stakeholders_lloyd: Vec<StakeholderScreening>,
    /// Intelligence-B vessel stakeholder screening.
    #[serde(rename = "vessel_stakeholder_is_sanction_kpler", default)]
    pub vessel_stakeholders_kpler: Vec<StakeholderScreening>,
    /// Supplied-fleet screening, Intelligence-A sanctions view.
    #[serde(default)]
    pub fleet_lloyd: Vec<FleetVerdict>,
    /// Supplied-fleet screening, Intelligence-B view.
    #[serde(default)]
    pub fleet_kpler: Vec<FleetVerdict>,
    /// Supplied-fleet screening, watchlist view.
    #[serde(default)]
    pub fleet_uani: Vec<FleetVerdict>,
    /// Operator echo.
    #[serde(default)]
    pub operator: OperatorInfo,
    /// When the screening ran.
    pub screened_at: DateTime<Utc>,
}

impl OperationVerdict {
    /// Find the role key matching `role` case-insensitively.
    pub fn role_key(&self, role: &str) -> Option<String> {
        let wanted = role.trim().to_lowercase();
        self.stakeholders
            .keys()
            .find(|k| k.to_lowercase() == wanted)
            .cloned()
    }

    /// Mutable access to the stakeholder entry for (role, name), matching
    /// the role case-insensitively and the name under normalization.
    pub fn stakeholder_entry_mut(
        &mut self,
        role: &str,
        name: &str,
    ) -> Option<&mut StakeholderVerdict> {
        let key = self.role_key(role)?;
        let wanted = normalized_name(name);
        self.stakeholders
            .get_mut(&key)?
            .iter_mut()
            .find(|entry| normalized_name(&entry.name) == wanted)
    }

    /// Read-only stakeholder entry lookup for (role, name).
    pub fn stakeholder_entry(&self, role: &str, name: &str) -> Option<&StakeholderVerdict> {
        let key = self.role_key(role)?;
        let wanted = normalized_name(name);
        self.stakeholders
            .get(&key)?
            .iter()
            .find(|entry| normalized_name(&entry.name) == wanted)
    }

    /// All stakeholder levels (request-supplied counterparties plus
    /// provider-reported vessel stakeholders).
    pub fn stakeholder_levels(&self) -> Vec<RiskLevel> {
        self.stakeholders
            .values()
            .flatten()
            .map(|entry| entry.level)
            .chain(self.vessel_stakeholders_lloyd.iter().map(|s| s.level))
            .chain(self.vessel_stakeholders_kpler.iter().map(|s| s.level))
            .collect()
    }

    /// All vessel-level check levels.
    pub fn vessel_levels(&self) -> Vec<RiskLevel> {
        self.vessel_checks.values().map(|item| item.level).collect()
    }

    /// All fleet screening levels.
    pub fn fleet_levels(&self) -> Vec<RiskLevel> {
        self.fleet_lloyd
            .iter()
            .chain(&self.fleet_kpler)
            .chain(&self.fleet_uani)
            .map(|entry| entry.level)
            .collect()
    }

    /// The `(role, name, level)` projection used to decide whether a
    /// reconciled verdict diverges from the latest change-log revision.
    pub fn name_level_snapshot(&self) -> Vec<(String, String, RiskLevel)> {
        let mut snapshot: Vec<(String, String, RiskLevel)> = self
            .stakeholders
            .iter()
            .flat_map(|(role, entries)| {
                entries
                    .iter()
                    .map(|e| (role.clone(), normalized_name(&e.name), e.level))
            })
            .collect();
        snapshot.sort();
        snapshot
    }
}
