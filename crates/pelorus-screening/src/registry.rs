//! # Check Registry
//!
//! The declarative catalog of every check the stack can run. This module
//! is the only place where vertical-specific inclusion is expressed: each
//! [`Vertical`] names its check list, its stakeholder roles, and its
//! domain sub-status projections. Orchestrators and aggregators consult
//! the registry; they never hard-code check sets.
//!
//! The fixed classification tables live here too: the weighted sanction
//! sources, the provider risk-type strings, and the sanctioned EEZ name
//! set.

use serde::{Deserialize, Serialize};

use pelorus_core::RiskLevel;

// ─── Fixed classification tables ────────────────────────────────────────

/// Sanction sources that escalate a current vessel sanction to high risk.
pub const WEIGHTED_SANCTION_SOURCES: [&str; 4] = ["OFAC", "EU", "HM", "UN"];

/// Voyage risk tag marking a suspicious AIS reporting gap.
pub const SUSPICIOUS_AIS_GAP: &str = "Suspicious AIS Gap";

/// Voyage risk tag marking a call at a high-risk port.
pub const HIGH_RISK_PORT_CALLING: &str = "High Risk Port Calling";

/// Voyage risk tags marking a dark port call.
pub const DARK_PORT_CALL_TYPES: [&str; 2] =
    ["Possible Dark Port Calling", "Probable Dark Port Calling"];

/// Voyage risk tags marking a dark ship-to-ship transfer.
pub const DARK_STS_TYPES: [&str; 2] = ["Possible Dark STS", "Probable Dark STS"];

/// Voyage risk tags marking an STS transfer with a sanctioned vessel.
pub const SANCTIONED_STS_TYPES: [&str; 1] = ["STS With Sanctioned Vessel"];

/// Voyage risk tags marking suspicious loitering.
pub const LOITERING_TYPES: [&str; 1] = ["Suspicious Loitering"];

/// Advanced compliance-risk item type for AIS manipulation.
pub const AIS_MANIPULATION_TYPE: &str = "VesselAisManipulation";

/// EEZ names whose AIS gaps are flagged as sanctioned-water gaps.
/// Membership is tested case-insensitively.
pub const SANCTIONED_EEZ_NAMES: [&str; 6] = [
    "Iranian Exclusive Economic Zone",
    "North Korean Exclusive Economic Zone",
    "Syrian Exclusive Economic Zone",
    "Cuban Exclusive Economic Zone",
    "Venezuelan Exclusive Economic Zone",
    "Russian Exclusive Economic Zone",
];

/// Whether an EEZ name is in the sanctioned set (case-insensitive).
pub fn is_sanctioned_eez(name: &str) -> bool {
    SANCTIONED_EEZ_NAMES
        .iter()
        .any(|eez| eez.eq_ignore_ascii_case(name.trim()))
}

// ─── Check identity ─────────────────────────────────────────────────────

/// Identity of every check in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CheckId {
    /// Vessel currently on a sanctions list (Intelligence-A).
    LloydsSanctionsCurrent,
    /// Vessel historically on a sanctions list (Intelligence-A).
    LloydsSanctionsHistory,
    /// Vessel present in the UANI watchlist (local store).
    WatchlistMembership,
    /// Vessel risk score (Intelligence-A).
    LloydsRiskLevel,
    /// Vessel fleet sanction counters (Intelligence-B).
    KplerRiskLevel,
    /// AIS reporting gaps from voyage events (Intelligence-A).
    LloydsAisGap,
    /// AIS reporting gaps (Intelligence-B).
    KplerAisGap,
    /// Combined AIS-gap verdict over both providers.
    AisGap,
    /// AIS signal manipulation (Intelligence-A advanced risk).
    AisManipulation,
    /// High-risk port calls.
    RiskyPortCall,
    /// Dark port calls.
    DarkPortCall,
    /// Dark ship-to-ship transfer events.
    DarkSts,
    /// STS transfers with sanctioned vessels.
    SanctionedSts,
    /// Suspicious loitering.
    Loitering,
    /// Combined STS-conduct verdict (sanctioned STS + loitering).
    StsTransfer,
    /// Sanctioned cargo movements (Intelligence-B).
    CargoSanction,
    /// Sanctioned trade participation (Intelligence-B).
    TradeSanction,
    /// Sanctioned linked companies (Intelligence-B).
    SanctionedCompanies,
    /// Flag registration changed within the last year (Intelligence-A).
    FlagChange,
    /// Vessel stakeholder sanctions screening (Intelligence-A).
    StakeholderScreeningLloyds,
    /// Vessel stakeholder sanctions screening (Intelligence-B).
    StakeholderScreeningKpler,
    /// Counterparty name in the sanctions store (DowJones).
    DowJonesSanctions,
    /// Cargo origin country in the high-risk country table.
    CargoOriginCountry,
    /// Operating/berthing country in the high-risk country table.
    PortCountry,
}

impl CheckId {
    /// The stable wire/store key of this check.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::LloydsSanctionsCurrent => "vessel_is_sanction",
            Self::LloydsSanctionsHistory => "vessel_history_is_sanction",
            Self::WatchlistMembership => "vessel_in_uani",
            Self::LloydsRiskLevel => "vessel_risk_level_lloyd",
            Self::KplerRiskLevel => "vessel_risk_level_kpler",
            Self::LloydsAisGap => "vessel_ais_gap_lloyd",
            Self::KplerAisGap => "vessel_ais_gap_kpler",
            Self::AisGap => "vessel_ais_gap",
            Self::AisManipulation => "vessel_manipulation",
            Self::RiskyPortCall => "vessel_risky_port_call",
            Self::DarkPortCall => "vessel_dark_port_call",
            Self::DarkSts => "vessel_dark_sts_events",
            Self::SanctionedSts => "vessel_sanctioned_sts",
            Self::Loitering => "vessel_loitering",
            Self::StsTransfer => "vessel_sts_transfer",
            Self::CargoSanction => "vessel_cargo_sanction",
            Self::TradeSanction => "vessel_trade_sanction",
            Self::SanctionedCompanies => "vessel_sanctioned_companies",
            Self::FlagChange => "vessel_flag_change",
            Self::StakeholderScreeningLloyds => "vessel_stakeholder_is_sanction_lloyd",
            Self::StakeholderScreeningKpler => "vessel_stakeholder_is_sanction_kpler",
            Self::DowJonesSanctions => "dowjones_sanctions_risk",
            Self::CargoOriginCountry => "cargo_origin_from_sanctioned",
            Self::PortCountry => "port_origin_from_sanctioned",
        }
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Whether a check is a leaf classification or a reduction of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Classifies provider data directly.
    Atomic,
    /// Reduces the listed child checks (max severity).
    Composite {
        /// Child check ids, in evidence order.
        children: &'static [CheckId],
    },
}

/// Category tag used by the status projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckCategory {
    /// Counterparty sanctions screening.
    StakeholderSanctions,
    /// Vessel list-based sanctions exposure.
    VesselSanctions,
    /// Vessel behavioral risk.
    VesselBehavior,
    /// Cargo origin risk.
    CargoOrigin,
    /// Port / operating-area country risk.
    PortCountry,
}

/// What kind of subject a check screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    /// The operation's vessel, identified by IMO.
    Vessel,
    /// A named commercial counterparty.
    Entity,
    /// A country name.
    Country,
}

/// Declarative record for one check.
#[derive(Debug, Clone)]
pub struct CheckDescriptor {
    /// Check identity.
    pub id: CheckId,
    /// Atomic or composite.
    pub kind: CheckKind,
    /// Category tag for status projections.
    pub category: CheckCategory,
    /// Subject kind the check screens.
    pub subject: SubjectKind,
    /// Whether the check reads date-windowed provider data.
    pub needs_window: bool,
    /// The risk levels this check may emit.
    pub emits: &'static [RiskLevel],
    /// Human description used when no risk note overrides it.
    pub description: &'static str,
}

const NONE_MED_HIGH: &[RiskLevel] = &[RiskLevel::None, RiskLevel::Medium, RiskLevel::High];
const NONE_MED: &[RiskLevel] = &[RiskLevel::None, RiskLevel::Medium];
const NONE_HIGH: &[RiskLevel] = &[RiskLevel::None, RiskLevel::High];

/// The full catalog. Order here fixes evidence order for composites.
static CATALOG: &[CheckDescriptor] = &[
    CheckDescriptor {
        id: CheckId::LloydsSanctionsCurrent,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselSanctions,
        subject: SubjectKind::Vessel,
        needs_window: false,
        emits: NONE_MED_HIGH,
        description: "船舶涉制裁名单风险情况(当前)",
    },
    CheckDescriptor {
        id: CheckId::LloydsSanctionsHistory,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselSanctions,
        subject: SubjectKind::Vessel,
        needs_window: false,
        emits: NONE_MED,
        description: "船舶涉制裁名单风险情况(历史)",
    },
    CheckDescriptor {
        id: CheckId::WatchlistMembership,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselSanctions,
        subject: SubjectKind::Vessel,
        needs_window: false,
        emits: NONE_HIGH,
        description: "船舶涉UANI清单风险情况",
    },
    CheckDescriptor {
        id: CheckId::LloydsRiskLevel,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselSanctions,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_MED_HIGH,
        description: "船舶制裁合规结果(劳氏)",
    },
    CheckDescriptor {
        id: CheckId::KplerRiskLevel,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselSanctions,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_HIGH,
        description: "船舶制裁合规结果(开普勒)",
    },
    CheckDescriptor {
        id: CheckId::LloydsAisGap,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_MED,
        description: "AIS信号缺失风险情况(劳氏)",
    },
    CheckDescriptor {
        id: CheckId::KplerAisGap,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_MED,
        description: "AIS信号缺失风险情况(开普勒)",
    },
    CheckDescriptor {
        id: CheckId::AisGap,
        kind: CheckKind::Composite {
            children: &[CheckId::LloydsAisGap, CheckId::KplerAisGap],
        },
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_MED,
        description: "船舶AIS信号缺失风险情况",
    },
    CheckDescriptor {
        id: CheckId::AisManipulation,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: false,
        emits: NONE_MED_HIGH,
        description: "船舶AIS信号伪造及篡改风险情况",
    },
    CheckDescriptor {
        id: CheckId::RiskyPortCall,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_HIGH,
        description: "船舶挂靠高风险港口风险情况",
    },
    CheckDescriptor {
        id: CheckId::DarkPortCall,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_HIGH,
        description: "船舶暗港访问风险情况",
    },
    CheckDescriptor {
        id: CheckId::DarkSts,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_HIGH,
        description: "船舶暗STS事件风险情况",
    },
    CheckDescriptor {
        id: CheckId::SanctionedSts,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_HIGH,
        description: "STS转运涉制裁船舶风险情况",
    },
    CheckDescriptor {
        id: CheckId::Loitering,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_MED,
        description: "可疑徘徊风险情况",
    },
    CheckDescriptor {
        id: CheckId::StsTransfer,
        kind: CheckKind::Composite {
            children: &[CheckId::SanctionedSts, CheckId::Loitering],
        },
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_MED_HIGH,
        description: "船舶STS转运风险情况",
    },
    CheckDescriptor {
        id: CheckId::CargoSanction,
        kind: CheckKind::Atomic,
        category: CheckCategory::CargoOrigin,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_HIGH,
        description: "船舶运输受制裁货物风险情况",
    },
    CheckDescriptor {
        id: CheckId::TradeSanction,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselSanctions,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_HIGH,
        description: "船舶涉及受制裁贸易风险情况",
    },
    CheckDescriptor {
        id: CheckId::SanctionedCompanies,
        kind: CheckKind::Atomic,
        category: CheckCategory::StakeholderSanctions,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_HIGH,
        description: "船舶关联公司涉制裁风险情况",
    },
    CheckDescriptor {
        id: CheckId::FlagChange,
        kind: CheckKind::Atomic,
        category: CheckCategory::VesselBehavior,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_MED,
        description: "船舶船旗变更风险情况",
    },
    CheckDescriptor {
        id: CheckId::StakeholderScreeningLloyds,
        kind: CheckKind::Atomic,
        category: CheckCategory::StakeholderSanctions,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_MED_HIGH,
        description: "船舶相关方涉制裁风险情况(劳氏)",
    },
    CheckDescriptor {
        id: CheckId::StakeholderScreeningKpler,
        kind: CheckKind::Atomic,
        category: CheckCategory::StakeholderSanctions,
        subject: SubjectKind::Vessel,
        needs_window: true,
        emits: NONE_MED_HIGH,
        description: "船舶相关方涉制裁风险情况(开普勒)",
    },
    CheckDescriptor {
        id: CheckId::DowJonesSanctions,
        kind: CheckKind::Atomic,
        category: CheckCategory::StakeholderSanctions,
        subject: SubjectKind::Entity,
        needs_window: false,
        emits: NONE_MED_HIGH,
        description: "道琼斯制裁风险检查",
    },
    CheckDescriptor {
        id: CheckId::CargoOriginCountry,
        kind: CheckKind::Atomic,
        category: CheckCategory::CargoOrigin,
        subject: SubjectKind::Country,
        needs_window: false,
        emits: NONE_HIGH,
        description: "货物来源受制裁国家风险情况",
    },
    CheckDescriptor {
        id: CheckId::PortCountry,
        kind: CheckKind::Atomic,
        category: CheckCategory::PortCountry,
        subject: SubjectKind::Country,
        needs_window: false,
        emits: NONE_HIGH,
        description: "港口来源受制裁国家风险情况",
    },
];

/// Look up the descriptor for a check.
pub fn descriptor(id: CheckId) -> &'static CheckDescriptor {
    CATALOG
        .iter()
        .find(|d| d.id == id)
        .expect("every CheckId has a catalog entry")
}

/// The whole catalog, in registry order.
pub fn catalog() -> &'static [CheckDescriptor] {
    CATALOG
}

// ─── Verticals ──────────────────────────────────────────────────────────

/// How many names a stakeholder role carries in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one name.
    Single,
    /// Zero or more names.
    Many,
}

/// One stakeholder role of a vertical.
#[derive(Debug, Clone, Copy)]
pub struct RoleSpec {
    /// Role key as it appears in request/verdict JSON and approvals.
    pub key: &'static str,
    /// Request cardinality. Verdicts always carry arrays.
    pub cardinality: Cardinality,
}

/// One domain sub-status of a vertical: the named max over a check subset.
#[derive(Debug, Clone, Copy)]
pub struct DomainSpec {
    /// Sub-status key in the verdict (e.g. `cargo_risk_status`).
    pub key: &'static str,
    /// The checks the sub-status reduces over.
    pub checks: &'static [CheckId],
}

/// A screening vertical — one inbound operation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    /// Ship-to-ship bunkering operation.
    StsBunkering,
    /// Vessel purchase.
    VesselPurchase,
    /// Second-hand vessel disposal.
    SecondHandDisposal,
    /// Warehousing berth call.
    WarehousingBerth,
}

const STS_CHECKS: &[CheckId] = &[
    CheckId::LloydsSanctionsCurrent,
    CheckId::LloydsSanctionsHistory,
    CheckId::WatchlistMembership,
    CheckId::LloydsRiskLevel,
    CheckId::KplerRiskLevel,
    CheckId::LloydsAisGap,
    CheckId::KplerAisGap,
    CheckId::AisGap,
    CheckId::AisManipulation,
    CheckId::RiskyPortCall,
    CheckId::DarkPortCall,
    CheckId::DarkSts,
    CheckId::SanctionedSts,
    CheckId::Loitering,
    CheckId::StsTransfer,
    CheckId::CargoSanction,
    CheckId::TradeSanction,
    CheckId::StakeholderScreeningLloyds,
    CheckId::StakeholderScreeningKpler,
    CheckId::CargoOriginCountry,
    CheckId::PortCountry,
];

const PURCHASE_CHECKS: &[CheckId] = &[
    CheckId::LloydsSanctionsCurrent,
    CheckId::LloydsSanctionsHistory,
    CheckId::WatchlistMembership,
    CheckId::LloydsRiskLevel,
    CheckId::KplerRiskLevel,
    CheckId::LloydsAisGap,
    CheckId::KplerAisGap,
    CheckId::AisGap,
    CheckId::AisManipulation,
    CheckId::RiskyPortCall,
    CheckId::DarkPortCall,
    CheckId::DarkSts,
    CheckId::SanctionedSts,
    CheckId::Loitering,
    CheckId::StsTransfer,
    CheckId::CargoSanction,
    CheckId::TradeSanction,
    CheckId::SanctionedCompanies,
    CheckId::FlagChange,
    CheckId::StakeholderScreeningLloyds,
    CheckId::StakeholderScreeningKpler,
];

const SECOND_HAND_CHECKS: &[CheckId] = &[
    CheckId::LloydsSanctionsCurrent,
    CheckId::LloydsSanctionsHistory,
    CheckId::WatchlistMembership,
    CheckId::LloydsRiskLevel,
    CheckId::KplerRiskLevel,
    CheckId::LloydsAisGap,
    CheckId::KplerAisGap,
    CheckId::AisGap,
    CheckId::AisManipulation,
    CheckId::RiskyPortCall,
    CheckId::DarkPortCall,
    CheckId::DarkSts,
    CheckId::SanctionedSts,
    CheckId::Loitering,
    CheckId::StsTransfer,
    CheckId::SanctionedCompanies,
    CheckId::FlagChange,
    CheckId::StakeholderScreeningLloyds,
    CheckId::StakeholderScreeningKpler,
];

const WAREHOUSING_CHECKS: &[CheckId] = &[
    CheckId::LloydsSanctionsCurrent,
    CheckId::LloydsSanctionsHistory,
    CheckId::WatchlistMembership,
    CheckId::LloydsRiskLevel,
    CheckId::KplerRiskLevel,
    CheckId::LloydsAisGap,
    CheckId::KplerAisGap,
    CheckId::AisGap,
    CheckId::AisManipulation,
    CheckId::RiskyPortCall,
    CheckId::DarkPortCall,
    CheckId::DarkSts,
    CheckId::SanctionedSts,
    CheckId::Loitering,
    CheckId::StsTransfer,
    CheckId::CargoSanction,
    CheckId::TradeSanction,
    CheckId::StakeholderScreeningLloyds,
    CheckId::StakeholderScreeningKpler,
    CheckId::CargoOriginCountry,
    CheckId::PortCountry,
];

const STS_ROLES: &[RoleSpec] = &[
    RoleSpec { key: "charterers", cardinality: Cardinality::Single },
    RoleSpec { key: "consignee", cardinality: Cardinality::Many },
    RoleSpec { key: "consignor", cardinality: Cardinality::Many },
    RoleSpec { key: "agent", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_broker", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_owner", cardinality: Cardinality::Single },
    RoleSpec { key: "vessel_manager", cardinality: Cardinality::Single },
    RoleSpec { key: "vessel_operator", cardinality: Cardinality::Single },
];

const PURCHASE_ROLES: &[RoleSpec] = &[
    RoleSpec { key: "purchaser", cardinality: Cardinality::Single },
    RoleSpec { key: "vessel_seller", cardinality: Cardinality::Single },
    RoleSpec { key: "vessel_owner", cardinality: Cardinality::Single },
    RoleSpec { key: "vessel_legal_holder", cardinality: Cardinality::Single },
    RoleSpec { key: "shipbuilding_party", cardinality: Cardinality::Single },
    RoleSpec { key: "agent", cardinality: Cardinality::Many },
    RoleSpec { key: "financial_institution", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_insurer", cardinality: Cardinality::Many },
    RoleSpec { key: "legal_advisor", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_manager", cardinality: Cardinality::Single },
    RoleSpec { key: "vessel_final_beneficiary", cardinality: Cardinality::Single },
    RoleSpec { key: "vessel_operator", cardinality: Cardinality::Single },
];

const SECOND_HAND_ROLES: &[RoleSpec] = &[
    RoleSpec { key: "intent_transferee", cardinality: Cardinality::Single },
    RoleSpec { key: "intent_transferee_shareholder", cardinality: Cardinality::Many },
    RoleSpec { key: "intent_transferee_controller", cardinality: Cardinality::Single },
    RoleSpec { key: "intent_vessel_manager", cardinality: Cardinality::Single },
    RoleSpec { key: "intent_vessel_manager_shareholder", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_manager_controller", cardinality: Cardinality::Single },
    RoleSpec { key: "vessel_operator", cardinality: Cardinality::Single },
    RoleSpec { key: "agent", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_owner_supplied", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_manager_supplied", cardinality: Cardinality::Many },
];

const WAREHOUSING_ROLES: &[RoleSpec] = &[
    RoleSpec { key: "vessel_manager", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_owner", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_final_beneficiary", cardinality: Cardinality::Many },
    RoleSpec { key: "vessel_operator", cardinality: Cardinality::Many },
];

const CARGO_DOMAIN: DomainSpec = DomainSpec {
    key: "cargo_risk_status",
    checks: &[CheckId::CargoSanction, CheckId::CargoOriginCountry],
};

const PORT_DOMAIN: DomainSpec = DomainSpec {
    key: "port_risk_status",
    checks: &[CheckId::RiskyPortCall, CheckId::DarkPortCall, CheckId::PortCountry],
};

const CUSTOMER_DOMAIN: DomainSpec = DomainSpec {
    key: "customer_risk_status",
    checks: &[CheckId::DowJonesSanctions],
};

const STS_DOMAINS: &[DomainSpec] = &[CARGO_DOMAIN, PORT_DOMAIN, CUSTOMER_DOMAIN];
const PURCHASE_DOMAINS: &[DomainSpec] = &[CUSTOMER_DOMAIN];
const SECOND_HAND_DOMAINS: &[DomainSpec] = &[CUSTOMER_DOMAIN];
const WAREHOUSING_DOMAINS: &[DomainSpec] = &[CARGO_DOMAIN, PORT_DOMAIN, CUSTOMER_DOMAIN];

impl Vertical {
    /// Stable key used in the verdict store's `vertical` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StsBunkering => "sts_bunkering",
            Self::VesselPurchase => "vessel_purchase",
            Self::SecondHandDisposal => "second_hand_disposal",
            Self::WarehousingBerth => "warehousing_berth",
        }
    }

    /// The vessel-level checks this vertical runs, in registry order.
    pub fn checks(&self) -> &'static [CheckId] {
        match self {
            Self::StsBunkering => STS_CHECKS,
            Self::VesselPurchase => PURCHASE_CHECKS,
            Self::SecondHandDisposal => SECOND_HAND_CHECKS,
            Self::WarehousingBerth => WAREHOUSING_CHECKS,
        }
    }

    /// The stakeholder roles this vertical screens.
    pub fn roles(&self) -> &'static [RoleSpec] {
        match self {
            Self::StsBunkering => STS_ROLES,
            Self::VesselPurchase => PURCHASE_ROLES,
            Self::SecondHandDisposal => SECOND_HAND_ROLES,
            Self::WarehousingBerth => WAREHOUSING_ROLES,
        }
    }

    /// Domain sub-status projections for this vertical.
    pub fn domains(&self) -> &'static [DomainSpec] {
        match self {
            Self::StsBunkering => STS_DOMAINS,
            Self::VesselPurchase => PURCHASE_DOMAINS,
            Self::SecondHandDisposal => SECOND_HAND_DOMAINS,
            Self::WarehousingBerth => WAREHOUSING_DOMAINS,
        }
    }

    /// Whether this vertical screens a supplied fleet list.
    pub fn screens_fleet(&self) -> bool {
        matches!(self, Self::VesselPurchase | Self::SecondHandDisposal)
    }
}

impl std::fmt::Display for Vertical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
