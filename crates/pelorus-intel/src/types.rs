//! # Provider-Native Response Shapes
//!
//! Decoded shapes for each provider endpoint, kept as close to the wire as
//! practical. Fields the evaluators classify on are typed; everything else
//! a provider sends is preserved verbatim in the flattened `extra` map so
//! check evidence can carry the raw record.
//!
//! Intelligence-A ("Lloyds") responses arrive in a documented envelope
//! `{ "IsSuccess": bool, "Data": { "Items": [...] } }` and use PascalCase
//! field names. Intelligence-B ("Kpler") responses are bare arrays/objects
//! in camelCase.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─── Intelligence-A envelope ────────────────────────────────────────────

/// The Intelligence-A response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LloydsEnvelope<T> {
    /// Whether the provider reports the call as successful.
    #[serde(rename = "IsSuccess", default)]
    pub is_success: bool,
    /// Payload wrapper.
    #[serde(rename = "Data", default = "LloydsData::empty")]
    pub data: LloydsData<T>,
}

/// The `Data` member of the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LloydsData<T> {
    /// The item list; empty when the provider has nothing for the vessel.
    #[serde(rename = "Items", default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> LloydsData<T> {
    fn empty() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> LloydsEnvelope<T> {
    /// Unwrap the envelope into its items, empty on `IsSuccess=false`.
    pub fn into_items(self) -> Vec<T> {
        if self.is_success {
            self.data.items
        } else {
            Vec::new()
        }
    }
}

// ─── Intelligence-A item shapes ─────────────────────────────────────────

/// One vessel sanction record (`/vesselsanctions_v2`).
///
/// A record is *current* iff its end date is empty or absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanctionRecord {
    /// Sanctioning source list (e.g. `OFAC`, `EU`, `HM`, `UN`).
    #[serde(rename = "Source", default)]
    pub source: Option<String>,
    /// Sanction start date, provider-formatted.
    #[serde(rename = "StartDate", default)]
    pub start_date: Option<String>,
    /// Sanction end date; empty or absent means still in force.
    #[serde(rename = "EndDate", default)]
    pub end_date: Option<String>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SanctionRecord {
    /// Whether this sanction is still in force.
    pub fn is_current(&self) -> bool {
        self.end_date.as_deref().map_or(true, |d| d.trim().is_empty())
    }
}

/// One vessel risk-score record (`/vesselriskscore`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScoreRecord {
    /// Total risk score; `100` means the provider's maximum.
    #[serde(rename = "TotalRiskScore", default)]
    pub total_risk_score: Option<f64>,
    /// Current flag registration details.
    #[serde(rename = "Flag", default)]
    pub flag: Option<FlagDetail>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Flag registration details embedded in a risk-score record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagDetail {
    /// Flag state name.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// Date the vessel started flying this flag (ISO date).
    #[serde(rename = "FlagStartDate", default)]
    pub flag_start_date: Option<String>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One advanced compliance-risk item (`/vesseladvancedcompliancerisk_v3`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedRiskRecord {
    /// Risk item type, e.g. `VesselAisManipulation`.
    #[serde(rename = "RiskType", default)]
    pub risk_type: Option<String>,
    /// Provider severity: `High` / `Medium` / `Low`.
    #[serde(rename = "ComplianceRiskScore", default)]
    pub compliance_risk_score: Option<String>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One voyage event (`/vesselvoyageevents`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoyageEvent {
    /// Risk tags on this voyage, e.g. `Suspicious AIS Gap`,
    /// `High Risk Port Calling`.
    #[serde(rename = "RiskTypes", default)]
    pub risk_types: Vec<String>,
    /// EEZ in which an AIS gap started, when the voyage carries a gap tag.
    #[serde(rename = "AisGapStartEezName", default)]
    pub ais_gap_start_eez_name: Option<String>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VoyageEvent {
    /// Whether this voyage carries the given risk tag (exact match).
    pub fn has_risk_type(&self, tag: &str) -> bool {
        self.risk_types.iter().any(|t| t == tag)
    }
}

/// One stakeholder row from compliance screening
/// (`/vesselcompliancescreening_v3`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceStakeholder {
    /// Stakeholder relation to the vessel (owner, manager, operator, ...).
    #[serde(rename = "StakeholderType", default)]
    pub stakeholder_type: Option<String>,
    /// Stakeholder company name.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// Provider sanction classification for this stakeholder.
    #[serde(rename = "SanctionRiskLevel", default)]
    pub sanction_risk_level: Option<String>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ─── Intelligence-B shapes ──────────────────────────────────────────────

/// One vessel entry from the bulk risks endpoint (POST, array of IMOs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KplerVesselRisk {
    /// Vessel IMO.
    #[serde(default)]
    pub imo: Option<i64>,
    /// Fleet sanction counter; non-zero marks a sanctioned vessel.
    #[serde(rename = "sanctionCount", default)]
    pub sanction_count: Option<i64>,
    /// Compliance detail block.
    #[serde(default)]
    pub compliance: Option<KplerCompliance>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Compliance detail of a Kpler vessel risk entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KplerCompliance {
    /// Sanction-derived risks.
    #[serde(rename = "sanctionRisks", default)]
    pub sanction_risks: Option<KplerSanctionRisks>,
    /// Behavior-derived risks.
    #[serde(rename = "operationalRisks", default)]
    pub operational_risks: Option<KplerOperationalRisks>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sanction-derived risk arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KplerSanctionRisks {
    /// Sanctioned cargo movements carried by the vessel.
    #[serde(rename = "sanctionedCargo", default)]
    pub sanctioned_cargo: Vec<Value>,
    /// Sanctioned trades the vessel took part in.
    #[serde(rename = "sanctionedTrades", default)]
    pub sanctioned_trades: Vec<Value>,
    /// Sanctioned companies linked to the vessel.
    #[serde(rename = "sanctionedCompanies", default)]
    pub sanctioned_companies: Vec<Value>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Behavior-derived risk arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KplerOperationalRisks {
    /// Detected AIS reporting gaps.
    #[serde(rename = "aisGaps", default)]
    pub ais_gaps: Vec<Value>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry from the compliance-screening endpoint (GET `vessels=`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KplerScreeningRecord {
    /// Vessel IMO.
    #[serde(default)]
    pub imo: Option<i64>,
    /// Overall screening vocabulary:
    /// `Sanctioned` / `Risks detected` / `No risk`.
    #[serde(rename = "complianceRisk", default)]
    pub compliance_risk: Option<String>,
    /// Companies linked to the vessel with their own screening status.
    #[serde(rename = "sanctionedCompanies", default)]
    pub sanctioned_companies: Vec<KplerLinkedCompany>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A company linked to a screened vessel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KplerLinkedCompany {
    /// Company name.
    #[serde(default)]
    pub name: Option<String>,
    /// Relation to the vessel (owner, manager, operator, ...).
    #[serde(rename = "relationship", default)]
    pub relationship: Option<String>,
    /// Remaining provider fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
