//! # Atomic Check Evaluators
//!
//! One pure classification function per atomic check. Every evaluator
//! takes the subject plus already-fetched data ([`VesselIntel`] or a
//! local-store lookup row) and returns a [`CheckResult`]; none of them
//! perform I/O. A failed prefetch slot classifies as no-risk with the
//! failure recorded in the reason map — a broken provider never aborts a
//! screening and never escalates one.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::{json, Value};

use pelorus_core::{Imo, RiskLevel};
use pelorus_intel::types::{KplerSanctionRisks, KplerVesselRisk};
use pelorus_intel::{Slot, VesselIntel};

use crate::lookup::{SanctionsRow, WatchlistHit};
use crate::registry::{
    self, CheckId, DARK_PORT_CALL_TYPES, DARK_STS_TYPES, HIGH_RISK_PORT_CALLING, LOITERING_TYPES,
    SANCTIONED_STS_TYPES, SUSPICIOUS_AIS_GAP, WEIGHTED_SANCTION_SOURCES,
};
use crate::result::CheckResult;
use crate::verdict::StakeholderScreening;

fn vessel_subject(intel: &VesselIntel) -> String {
    intel.imo.as_ref().map(Imo::to_string).unwrap_or_default()
}

/// Unwrap a prefetch slot, or short-circuit with a failure result.
fn slot_records<'a, T>(
    check: CheckId,
    subject: &str,
    now: DateTime<Utc>,
    slot: &'a Slot<Vec<T>>,
) -> Result<&'a [T], CheckResult> {
    match slot {
        Slot::Ready(records) => Ok(records),
        Slot::Failed(detail) => Err(CheckResult::upstream_failed(check, subject, now, detail)),
    }
}

// ─── Vessel sanctions (Intelligence-A) ──────────────────────────────────

/// Current sanctions exposure: any in-force record from a weighted source
/// is high risk; any other in-force record, or any ended record, is
/// medium.
pub fn lloyds_sanctions_current(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    let subject = vessel_subject(intel);
    let records = match slot_records(CheckId::LloydsSanctionsCurrent, &subject, now, &intel.sanctions)
    {
        Ok(records) => records,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(CheckId::LloydsSanctionsCurrent, subject, now);
    let current: Vec<_> = records.iter().filter(|r| r.is_current()).collect();
    let historical_count = records.len() - current.len();

    let weighted = current.iter().any(|r| {
        r.source
            .as_deref()
            .map(str::trim)
            .is_some_and(|s| WEIGHTED_SANCTION_SOURCES.iter().any(|w| s.eq_ignore_ascii_case(w)))
    });

    let level = if weighted {
        RiskLevel::High
    } else if !current.is_empty() || historical_count > 0 {
        RiskLevel::Medium
    } else {
        RiskLevel::None
    };

    for record in &current {
        result.push_evidence(serde_json::to_value(record).unwrap_or(Value::Null));
    }
    result.note_reason("current_count", json!(current.len()));
    result.note_reason("historical_count", json!(historical_count));
    result.with_level(level)
}

/// Historical sanctions exposure: only ended records count.
pub fn lloyds_sanctions_history(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    let subject = vessel_subject(intel);
    let records = match slot_records(CheckId::LloydsSanctionsHistory, &subject, now, &intel.sanctions)
    {
        Ok(records) => records,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(CheckId::LloydsSanctionsHistory, subject, now);
    let ended: Vec<_> = records.iter().filter(|r| !r.is_current()).collect();
    for record in &ended {
        result.push_evidence(serde_json::to_value(record).unwrap_or(Value::Null));
    }
    result.note_reason("historical_count", json!(ended.len()));
    if ended.is_empty() {
        result
    } else {
        result.with_level(RiskLevel::Medium)
    }
}

// ─── Watchlist (UANI) ───────────────────────────────────────────────────

/// Watchlist membership: present is high risk, absent is clean.
pub fn watchlist_membership(
    imo: Option<&Imo>,
    hit: &WatchlistHit,
    now: DateTime<Utc>,
) -> CheckResult {
    let subject = imo.map(Imo::to_string).unwrap_or_default();
    let mut result = CheckResult::clean(CheckId::WatchlistMembership, subject, now);
    if hit.found {
        if let Some(record) = &hit.record {
            result.push_evidence(record.clone());
        }
        result.note_reason("in_watchlist", json!(true));
        result.with_level(RiskLevel::High)
    } else {
        result.note_reason("in_watchlist", json!(false));
        result
    }
}

// ─── Provider risk scores ───────────────────────────────────────────────

/// Intelligence-A risk score: the provider's maximum (100) is high; any
/// other numeric score is medium; no score is clean.
pub fn lloyds_risk_level(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    let subject = vessel_subject(intel);
    let records = match slot_records(CheckId::LloydsRiskLevel, &subject, now, &intel.risk_score) {
        Ok(records) => records,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(CheckId::LloydsRiskLevel, subject, now);
    let score = records.iter().find_map(|r| r.total_risk_score);
    if let Some(score) = score {
        for record in records {
            result.push_evidence(serde_json::to_value(record).unwrap_or(Value::Null));
        }
        result.note_reason("total_risk_score", json!(score));
        let level = if (score - 100.0).abs() < f64::EPSILON {
            RiskLevel::High
        } else {
            RiskLevel::Medium
        };
        result.with_level(level)
    } else {
        result
    }
}

/// Select the subject vessel's entry from a bulk response. Bulk calls
/// are shared across a whole fleet, so an entry is used only when its
/// IMO matches the subject; a vessel the provider omitted gets no data,
/// never a neighbour's. The first entry stands in only when the subject
/// has no IMO at all.
fn kpler_entry_for<'a>(
    intel: &'a VesselIntel,
    entries: &'a [KplerVesselRisk],
) -> Option<&'a KplerVesselRisk> {
    match intel.imo.as_ref().map(|imo| i64::from(imo.as_u32())) {
        Some(wanted) => entries.iter().find(|e| e.imo == Some(wanted)),
        None => entries.first(),
    }
}

/// Intelligence-B risk: a non-zero fleet sanction counter is high risk.
pub fn kpler_risk_level(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    let subject = vessel_subject(intel);
    let records = match slot_records(CheckId::KplerRiskLevel, &subject, now, &intel.vessel_risks) {
        Ok(records) => records,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(CheckId::KplerRiskLevel, subject, now);
    if let Some(entry) = kpler_entry_for(intel, records) {
        let count = entry.sanction_count.unwrap_or(0);
        result.push_evidence(serde_json::to_value(entry).unwrap_or(Value::Null));
        result.note_reason("sanction_count", json!(count));
        if count > 0 {
            return result.with_level(RiskLevel::High);
        }
    }
    result
}

// ─── AIS behavior ───────────────────────────────────────────────────────

/// Intelligence-A AIS gaps: any voyage tagged as a suspicious gap is
/// medium risk. Each gap's evidence entry carries `is_sanctioned_eez`
/// (`是`/`否`) from the fixed sanctioned-EEZ name set.
pub fn lloyds_ais_gap(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    let subject = vessel_subject(intel);
    let events = match slot_records(CheckId::LloydsAisGap, &subject, now, &intel.voyage_events) {
        Ok(events) => events,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(CheckId::LloydsAisGap, subject, now);
    let mut sanctioned_gaps = 0usize;
    let mut gap_count = 0usize;
    for event in events.iter().filter(|e| e.has_risk_type(SUSPICIOUS_AIS_GAP)) {
        gap_count += 1;
        let in_sanctioned_eez = event
            .ais_gap_start_eez_name
            .as_deref()
            .is_some_and(registry::is_sanctioned_eez);
        if in_sanctioned_eez {
            sanctioned_gaps += 1;
        }
        let mut payload = serde_json::to_value(event).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut payload {
            map.insert(
                "is_sanctioned_eez".into(),
                Value::String(if in_sanctioned_eez { "是" } else { "否" }.into()),
            );
        }
        result.push_evidence(payload);
    }
    result.note_reason("gap_count", json!(gap_count));
    result.note_reason("sanctioned_eez_gap_count", json!(sanctioned_gaps));
    if gap_count == 0 {
        result
    } else {
        result.with_level(RiskLevel::Medium)
    }
}

/// Intelligence-B AIS gaps: any reported gap is medium risk.
pub fn kpler_ais_gap(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    let subject = vessel_subject(intel);
    let records = match slot_records(CheckId::KplerAisGap, &subject, now, &intel.vessel_risks) {
        Ok(records) => records,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(CheckId::KplerAisGap, subject, now);
    let gaps: Vec<Value> = kpler_entry_for(intel, records)
        .and_then(|e| e.compliance.as_ref())
        .and_then(|c| c.operational_risks.as_ref())
        .map(|o| o.ais_gaps.clone())
        .unwrap_or_default();
    result.note_reason("gap_count", json!(gaps.len()));
    let has_gaps = !gaps.is_empty();
    for gap in gaps {
        result.push_evidence(gap);
    }
    if has_gaps {
        result.with_level(RiskLevel::Medium)
    } else {
        result
    }
}

/// AIS manipulation: the provider's own severity on the manipulation item
/// maps High → high, Medium → medium, anything else → clean.
pub fn ais_manipulation(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    let subject = vessel_subject(intel);
    let records = match slot_records(CheckId::AisManipulation, &subject, now, &intel.advanced_risk) {
        Ok(records) => records,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(CheckId::AisManipulation, subject, now);
    let mut level = RiskLevel::None;
    for item in records
        .iter()
        .filter(|r| r.risk_type.as_deref() == Some(registry::AIS_MANIPULATION_TYPE))
    {
        let item_level = match item.compliance_risk_score.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("High") => RiskLevel::High,
            Some(s) if s.eq_ignore_ascii_case("Medium") => RiskLevel::Medium,
            _ => RiskLevel::None,
        };
        level = level.max(item_level);
        result.push_evidence(serde_json::to_value(item).unwrap_or(Value::Null));
    }
    result.with_level(level)
}

// ─── Voyage conduct checks ──────────────────────────────────────────────

/// Shared classifier for the voyage-tag checks: any voyage carrying one
/// of the listed tags yields `hit_level`.
pub fn voyage_tag_check(
    intel: &VesselIntel,
    check: CheckId,
    tags: &[&str],
    hit_level: RiskLevel,
    now: DateTime<Utc>,
) -> CheckResult {
    let subject = vessel_subject(intel);
    let events = match slot_records(check, &subject, now, &intel.voyage_events) {
        Ok(events) => events,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(check, subject, now);
    let mut hits = 0usize;
    for event in events {
        if tags.iter().any(|tag| event.has_risk_type(tag)) {
            hits += 1;
            result.push_evidence(serde_json::to_value(event).unwrap_or(Value::Null));
        }
    }
    result.note_reason("event_count", json!(hits));
    if hits == 0 {
        result
    } else {
        result.with_level(hit_level)
    }
}

/// High-risk port calls.
pub fn risky_port_call(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    voyage_tag_check(
        intel,
        CheckId::RiskyPortCall,
        &[HIGH_RISK_PORT_CALLING],
        RiskLevel::High,
        now,
    )
}

/// Dark port calls.
pub fn dark_port_call(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    voyage_tag_check(
        intel,
        CheckId::DarkPortCall,
        &DARK_PORT_CALL_TYPES,
        RiskLevel::High,
        now,
    )
}

/// Dark STS events.
pub fn dark_sts(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    voyage_tag_check(intel, CheckId::DarkSts, &DARK_STS_TYPES, RiskLevel::High, now)
}

/// STS transfers with sanctioned vessels.
pub fn sanctioned_sts(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    voyage_tag_check(
        intel,
        CheckId::SanctionedSts,
        &SANCTIONED_STS_TYPES,
        RiskLevel::High,
        now,
    )
}

/// Suspicious loitering.
pub fn loitering(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    voyage_tag_check(intel, CheckId::Loitering, &LOITERING_TYPES, RiskLevel::Medium, now)
}

// ─── Intelligence-B sanction arrays ─────────────────────────────────────

fn kpler_sanction_risks<'a>(
    intel: &'a VesselIntel,
    records: &'a [KplerVesselRisk],
) -> Option<&'a KplerSanctionRisks> {
    kpler_entry_for(intel, records)
        .and_then(|e| e.compliance.as_ref())
        .and_then(|c| c.sanction_risks.as_ref())
}

fn kpler_array_check(
    intel: &VesselIntel,
    check: CheckId,
    now: DateTime<Utc>,
    pick: impl Fn(&KplerSanctionRisks) -> &[Value],
) -> CheckResult {
    let subject = vessel_subject(intel);
    let records = match slot_records(check, &subject, now, &intel.vessel_risks) {
        Ok(records) => records,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(check, subject, now);
    let hits: Vec<Value> = kpler_sanction_risks(intel, records)
        .map(|risks| pick(risks).to_vec())
        .unwrap_or_default();
    result.note_reason("hit_count", json!(hits.len()));
    let found = !hits.is_empty();
    for hit in hits {
        result.push_evidence(hit);
    }
    if found {
        result.with_level(RiskLevel::High)
    } else {
        result
    }
}

/// Sanctioned cargo movements.
pub fn cargo_sanction(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    kpler_array_check(intel, CheckId::CargoSanction, now, |r| &r.sanctioned_cargo)
}

/// Sanctioned trade participation.
pub fn trade_sanction(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    kpler_array_check(intel, CheckId::TradeSanction, now, |r| &r.sanctioned_trades)
}

/// Sanctioned linked companies.
pub fn sanctioned_companies(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    kpler_array_check(intel, CheckId::SanctionedCompanies, now, |r| &r.sanctioned_companies)
}

// ─── Flag change ────────────────────────────────────────────────────────

/// Flag registration change within the last 365 days is medium risk.
pub fn flag_change(intel: &VesselIntel, now: DateTime<Utc>) -> CheckResult {
    let subject = vessel_subject(intel);
    let records = match slot_records(CheckId::FlagChange, &subject, now, &intel.risk_score) {
        Ok(records) => records,
        Err(failed) => return failed,
    };

    let mut result = CheckResult::clean(CheckId::FlagChange, subject, now);
    let flag = records.iter().find_map(|r| r.flag.as_ref());
    let Some(flag) = flag else {
        return result;
    };
    result.push_evidence(serde_json::to_value(flag).unwrap_or(Value::Null));

    // Provider dates may carry a time suffix; the leading ten characters
    // are the ISO date.
    let start = flag
        .flag_start_date
        .as_deref()
        .map(str::trim)
        .filter(|s| s.len() >= 10)
        .and_then(|s| NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d").ok());
    if let Some(start) = start {
        result.note_reason("flag_start_date", json!(start.to_string()));
        if now.date_naive() - start <= Duration::days(365) {
            return result.with_level(RiskLevel::Medium);
        }
    }
    result
}

// ─── Vessel stakeholder screenings ──────────────────────────────────────

/// Intelligence-A stakeholder screening: per-stakeholder provider
/// classifications, reduced to the worst for the check level.
pub fn stakeholder_screening_lloyds(
    intel: &VesselIntel,
    now: DateTime<Utc>,
) -> (CheckResult, Vec<StakeholderScreening>) {
    let subject = vessel_subject(intel);
    let records = match slot_records(
        CheckId::StakeholderScreeningLloyds,
        &subject,
        now,
        &intel.compliance,
    ) {
        Ok(records) => records,
        Err(failed) => return (failed, Vec::new()),
    };

    let mut result = CheckResult::clean(CheckId::StakeholderScreeningLloyds, subject, now);
    let mut entries = Vec::with_capacity(records.len());
    let mut level = RiskLevel::None;
    for record in records {
        let entry_level = RiskLevel::parse(record.sanction_risk_level.as_deref().unwrap_or(""));
        level = level.max(entry_level);
        entries.push(StakeholderScreening {
            stakeholder_type: record.stakeholder_type.clone().unwrap_or_default(),
            name: record.name.clone().unwrap_or_default(),
            level: entry_level,
            screened_at: now,
            evidence: serde_json::to_value(record).unwrap_or(Value::Null),
        });
        result.push_evidence(serde_json::to_value(record).unwrap_or(Value::Null));
    }
    result.note_reason("stakeholder_count", json!(entries.len()));
    (result.with_level(level), entries)
}

/// Intelligence-B stakeholder screening: sanctioned linked companies are
/// high-risk entries; the vessel's own screening vocabulary sets a floor.
pub fn stakeholder_screening_kpler(
    intel: &VesselIntel,
    now: DateTime<Utc>,
) -> (CheckResult, Vec<StakeholderScreening>) {
    let subject = vessel_subject(intel);
    let records = match slot_records(
        CheckId::StakeholderScreeningKpler,
        &subject,
        now,
        &intel.screening,
    ) {
        Ok(records) => records,
        Err(failed) => return (failed, Vec::new()),
    };

    let mut result = CheckResult::clean(CheckId::StakeholderScreeningKpler, subject, now);
    let mut entries = Vec::new();
    let mut level = RiskLevel::None;
    for record in records {
        level = level.max(RiskLevel::parse(record.compliance_risk.as_deref().unwrap_or("")));
        for company in &record.sanctioned_companies {
            level = RiskLevel::High;
            entries.push(StakeholderScreening {
                stakeholder_type: company.relationship.clone().unwrap_or_default(),
                name: company.name.clone().unwrap_or_default(),
                level: RiskLevel::High,
                screened_at: now,
                evidence: serde_json::to_value(company).unwrap_or(Value::Null),
            });
        }
        result.push_evidence(serde_json::to_value(record).unwrap_or(Value::Null));
    }
    result.note_reason("sanctioned_company_count", json!(entries.len()));
    (result.with_level(level), entries)
}

// ─── Entity and country checks ──────────────────────────────────────────

/// Sanctions-store screening of one counterparty name. A lookup miss is
/// clean; a hit maps the stored level and attaches the hit lists and
/// flags verbatim.
pub fn dowjones_sanctions(
    name: &str,
    row: Option<&SanctionsRow>,
    now: DateTime<Utc>,
) -> CheckResult {
    let mut result = CheckResult::clean(CheckId::DowJonesSanctions, name, now);
    let Some(row) = row else {
        return result;
    };
    if let Some(description) = &row.description {
        result.description = description.clone();
    }
    result.note_reason("sanctions_list", Value::Array(row.sanctions_list.clone()));
    result.note_reason("mid_sanctions_list", Value::Array(row.mid_sanctions_list.clone()));
    result.note_reason("no_sanctions_list", Value::Array(row.no_sanctions_list.clone()));
    result.note_reason("flags", Value::Object(row.flags.clone()));
    result.with_level(row.level())
}

/// Country-table membership check (cargo origin or port country).
pub fn country_membership(
    check: CheckId,
    country: Option<&str>,
    high_risk: bool,
    now: DateTime<Utc>,
) -> CheckResult {
    let subject = country.unwrap_or_default().trim().to_string();
    let mut result = CheckResult::clean(check, subject.clone(), now);
    if subject.is_empty() {
        return result;
    }
    result.note_reason("country", json!(subject));
    result.note_reason("high_risk", json!(high_risk));
    if high_risk {
        result.with_level(RiskLevel::High)
    } else {
        result
    }
}

/// Evaluate one atomic vessel-level check by id.
///
/// Composite ids are not accepted here; the composite evaluator reduces
/// them from the session's result set.
pub fn evaluate_vessel_check(
    check: CheckId,
    intel: &VesselIntel,
    watchlist: &WatchlistHit,
    now: DateTime<Utc>,
) -> Option<CheckResult> {
    Some(match check {
        CheckId::LloydsSanctionsCurrent => lloyds_sanctions_current(intel, now),
        CheckId::LloydsSanctionsHistory => lloyds_sanctions_history(intel, now),
        CheckId::WatchlistMembership => watchlist_membership(intel.imo.as_ref(), watchlist, now),
        CheckId::LloydsRiskLevel => lloyds_risk_level(intel, now),
        CheckId::KplerRiskLevel => kpler_risk_level(intel, now),
        CheckId::LloydsAisGap => lloyds_ais_gap(intel, now),
        CheckId::KplerAisGap => kpler_ais_gap(intel, now),
        CheckId::AisManipulation => ais_manipulation(intel, now),
        CheckId::RiskyPortCall => risky_port_call(intel, now),
        CheckId::DarkPortCall => dark_port_call(intel, now),
        CheckId::DarkSts => dark_sts(intel, now),
        CheckId::SanctionedSts => sanctioned_sts(intel, now),
        CheckId::Loitering => loitering(intel, now),
        CheckId::CargoSanction => cargo_sanction(intel, now),
        CheckId::TradeSanction => trade_sanction(intel, now),
        CheckId::SanctionedCompanies => sanctioned_companies(intel, now),
        CheckId::FlagChange => flag_change(intel, now),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pelorus_core::DateWindow;
    use pelorus_intel::types::{
        AdvancedRiskRecord, RiskScoreRecord, SanctionRecord, VoyageEvent,
    };
    use serde_json::json;

    fn base_intel() -> VesselIntel {
        let window = DateWindow::parse("2024-08-25", "2025-08-25").expect("window");
        let mut intel = VesselIntel::empty(window);
        intel.imo = Some(Imo::new("9842190").expect("imo"));
        intel
    }

    fn sanction(source: &str, end_date: &str) -> SanctionRecord {
        serde_json::from_value(json!({"Source": source, "EndDate": end_date})).expect("record")
    }

    #[test]
    fn clean_vessel_all_checks_none() {
        let intel = base_intel();
        let now = Utc::now();
        let watchlist = WatchlistHit::miss();
        for &check in crate::registry::Vertical::StsBunkering.checks() {
            if let Some(result) = evaluate_vessel_check(check, &intel, &watchlist, now) {
                assert_eq!(result.level, RiskLevel::None, "check {check} must be clean");
                assert!(result.evidence.is_empty(), "check {check} must carry no evidence");
            }
        }
    }

    #[test]
    fn ofac_current_sanction_is_high() {
        let mut intel = base_intel();
        intel.sanctions = Slot::Ready(vec![sanction("OFAC", "")]);
        let result = lloyds_sanctions_current(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.evidence.len(), 1);
    }

    #[test]
    fn unweighted_current_sanction_is_medium() {
        let mut intel = base_intel();
        intel.sanctions = Slot::Ready(vec![sanction("Switzerland", "")]);
        let result = lloyds_sanctions_current(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::Medium);
    }

    #[test]
    fn ended_sanction_is_medium_on_current_check() {
        let mut intel = base_intel();
        intel.sanctions = Slot::Ready(vec![sanction("OFAC", "2021-01-01")]);
        let result = lloyds_sanctions_current(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::Medium);
        // The ended record is not current evidence.
        assert!(result.evidence.is_empty());
    }

    #[test]
    fn history_check_counts_only_ended_records() {
        let mut intel = base_intel();
        intel.sanctions = Slot::Ready(vec![sanction("OFAC", ""), sanction("EU", "2020-05-01")]);
        let result = lloyds_sanctions_history(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.evidence.len(), 1);

        let mut intel = base_intel();
        intel.sanctions = Slot::Ready(vec![sanction("OFAC", "")]);
        let result = lloyds_sanctions_history(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::None);
    }

    #[test]
    fn watchlist_hit_is_high() {
        let imo = Imo::new("9842190").expect("imo");
        let hit = WatchlistHit::hit(json!({"vessel_name": "X", "imo": "9842190"}));
        let result = watchlist_membership(Some(&imo), &hit, Utc::now());
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.evidence.len(), 1);

        let result = watchlist_membership(Some(&imo), &WatchlistHit::miss(), Utc::now());
        assert_eq!(result.level, RiskLevel::None);
    }

    #[test]
    fn lloyds_score_100_is_high_other_is_medium() {
        let mut intel = base_intel();
        let record: RiskScoreRecord =
            serde_json::from_value(json!({"TotalRiskScore": 100.0})).expect("record");
        intel.risk_score = Slot::Ready(vec![record]);
        assert_eq!(lloyds_risk_level(&intel, Utc::now()).level, RiskLevel::High);

        let record: RiskScoreRecord =
            serde_json::from_value(json!({"TotalRiskScore": 37.5})).expect("record");
        intel.risk_score = Slot::Ready(vec![record]);
        assert_eq!(lloyds_risk_level(&intel, Utc::now()).level, RiskLevel::Medium);

        intel.risk_score = Slot::Ready(vec![]);
        assert_eq!(lloyds_risk_level(&intel, Utc::now()).level, RiskLevel::None);
    }

    #[test]
    fn kpler_sanction_count_is_high() {
        let mut intel = base_intel();
        let entry: KplerVesselRisk =
            serde_json::from_value(json!({"imo": 9842190, "sanctionCount": 2})).expect("entry");
        intel.vessel_risks = Slot::Ready(vec![entry]);
        assert_eq!(kpler_risk_level(&intel, Utc::now()).level, RiskLevel::High);
    }

    #[test]
    fn kpler_checks_ignore_other_vessels_in_bulk_response() {
        // Bulk responses are shared across a fleet; a vessel the provider
        // omitted must screen as no-data, not inherit a neighbour's entry.
        let mut intel = base_intel();
        let entries: Vec<KplerVesselRisk> = serde_json::from_value(json!([
            {
                "imo": 9700001,
                "sanctionCount": 5,
                "compliance": {"operationalRisks": {"aisGaps": [{"start": "2025-01-01"}]}}
            },
            {"imo": 9600002, "sanctionCount": 3}
        ]))
        .expect("entries");
        intel.vessel_risks = Slot::Ready(entries);

        let risk = kpler_risk_level(&intel, Utc::now());
        assert_eq!(risk.level, RiskLevel::None);
        assert!(risk.evidence.is_empty());
        assert_eq!(kpler_ais_gap(&intel, Utc::now()).level, RiskLevel::None);
    }

    #[test]
    fn kpler_entry_matches_subject_among_fleet_entries() {
        let mut intel = base_intel();
        let entries: Vec<KplerVesselRisk> = serde_json::from_value(json!([
            {"imo": 9700001, "sanctionCount": 5},
            {"imo": 9842190, "sanctionCount": 0}
        ]))
        .expect("entries");
        intel.vessel_risks = Slot::Ready(entries);

        // The subject's own clean counter wins over the neighbour's hit.
        let risk = kpler_risk_level(&intel, Utc::now());
        assert_eq!(risk.level, RiskLevel::None);
        assert_eq!(risk.reason["sanction_count"], json!(0));
    }

    #[test]
    fn sanctioned_eez_gap_marks_evidence() {
        let mut intel = base_intel();
        let event: VoyageEvent = serde_json::from_value(json!({
            "RiskTypes": ["Suspicious AIS Gap"],
            "AisGapStartEezName": "Iranian Exclusive Economic Zone"
        }))
        .expect("event");
        intel.voyage_events = Slot::Ready(vec![event]);
        let result = lloyds_ais_gap(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.evidence[0]["is_sanctioned_eez"], json!("是"));
        assert_eq!(result.reason["sanctioned_eez_gap_count"], json!(1));
    }

    #[test]
    fn non_sanctioned_eez_gap_marks_no() {
        let mut intel = base_intel();
        let event: VoyageEvent = serde_json::from_value(json!({
            "RiskTypes": ["Suspicious AIS Gap"],
            "AisGapStartEezName": "Pacific"
        }))
        .expect("event");
        intel.voyage_events = Slot::Ready(vec![event]);
        let result = lloyds_ais_gap(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.evidence[0]["is_sanctioned_eez"], json!("否"));
        assert_eq!(result.reason["sanctioned_eez_gap_count"], json!(0));
    }

    #[test]
    fn ais_manipulation_maps_provider_severity() {
        let mut intel = base_intel();
        let item = |score: &str| -> AdvancedRiskRecord {
            serde_json::from_value(json!({
                "RiskType": "VesselAisManipulation",
                "ComplianceRiskScore": score
            }))
            .expect("item")
        };
        intel.advanced_risk = Slot::Ready(vec![item("High")]);
        assert_eq!(ais_manipulation(&intel, Utc::now()).level, RiskLevel::High);
        intel.advanced_risk = Slot::Ready(vec![item("Medium")]);
        assert_eq!(ais_manipulation(&intel, Utc::now()).level, RiskLevel::Medium);
        intel.advanced_risk = Slot::Ready(vec![item("Low")]);
        assert_eq!(ais_manipulation(&intel, Utc::now()).level, RiskLevel::None);
    }

    #[test]
    fn other_risk_types_do_not_trip_manipulation() {
        let mut intel = base_intel();
        let item: AdvancedRiskRecord = serde_json::from_value(json!({
            "RiskType": "SomethingElse",
            "ComplianceRiskScore": "High"
        }))
        .expect("item");
        intel.advanced_risk = Slot::Ready(vec![item]);
        assert_eq!(ais_manipulation(&intel, Utc::now()).level, RiskLevel::None);
    }

    #[test]
    fn voyage_tag_checks_classify_on_fixed_strings() {
        let mut intel = base_intel();
        let event = |tag: &str| -> VoyageEvent {
            serde_json::from_value(json!({"RiskTypes": [tag]})).expect("event")
        };
        intel.voyage_events = Slot::Ready(vec![event("High Risk Port Calling")]);
        assert_eq!(risky_port_call(&intel, Utc::now()).level, RiskLevel::High);

        intel.voyage_events = Slot::Ready(vec![event("Probable Dark Port Calling")]);
        assert_eq!(dark_port_call(&intel, Utc::now()).level, RiskLevel::High);

        intel.voyage_events = Slot::Ready(vec![event("Possible Dark STS")]);
        assert_eq!(dark_sts(&intel, Utc::now()).level, RiskLevel::High);

        intel.voyage_events = Slot::Ready(vec![event("STS With Sanctioned Vessel")]);
        assert_eq!(sanctioned_sts(&intel, Utc::now()).level, RiskLevel::High);

        intel.voyage_events = Slot::Ready(vec![event("Suspicious Loitering")]);
        assert_eq!(loitering(&intel, Utc::now()).level, RiskLevel::Medium);

        intel.voyage_events = Slot::Ready(vec![event("Port Call")]);
        assert_eq!(risky_port_call(&intel, Utc::now()).level, RiskLevel::None);
    }

    #[test]
    fn kpler_sanction_arrays_classify_high() {
        let mut intel = base_intel();
        let entry: KplerVesselRisk = serde_json::from_value(json!({
            "imo": 9842190,
            "compliance": {"sanctionRisks": {
                "sanctionedCargo": [{"cargo": "crude"}],
                "sanctionedTrades": [],
                "sanctionedCompanies": [{"name": "Acme"}]
            }}
        }))
        .expect("entry");
        intel.vessel_risks = Slot::Ready(vec![entry]);
        assert_eq!(cargo_sanction(&intel, Utc::now()).level, RiskLevel::High);
        assert_eq!(trade_sanction(&intel, Utc::now()).level, RiskLevel::None);
        assert_eq!(sanctioned_companies(&intel, Utc::now()).level, RiskLevel::High);
    }

    #[test]
    fn flag_change_within_year_is_medium() {
        let now = Utc::now();
        let recent = (now.date_naive() - Duration::days(30)).to_string();
        let old = (now.date_naive() - Duration::days(800)).to_string();

        let mut intel = base_intel();
        let record = |date: &str| -> RiskScoreRecord {
            serde_json::from_value(json!({"Flag": {"Name": "Panama", "FlagStartDate": date}}))
                .expect("record")
        };
        intel.risk_score = Slot::Ready(vec![record(&recent)]);
        assert_eq!(flag_change(&intel, now).level, RiskLevel::Medium);

        intel.risk_score = Slot::Ready(vec![record(&old)]);
        assert_eq!(flag_change(&intel, now).level, RiskLevel::None);
    }

    #[test]
    fn failed_slot_isolates_to_none_with_error() {
        let mut intel = base_intel();
        intel.sanctions = Slot::Failed("provider denied access (HTTP 403)".into());
        let result = lloyds_sanctions_current(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::None);
        assert!(result.reason["error"].as_str().unwrap().contains("403"));
    }

    #[test]
    fn dowjones_maps_stored_level_and_attaches_reason() {
        let mut flags = serde_json::Map::new();
        flags.insert("is_san".into(), json!("1"));
        let row = SanctionsRow {
            level_raw: "中风险".into(),
            sanctions_list: vec![],
            mid_sanctions_list: vec![json!({"list": "EU consolidated"})],
            no_sanctions_list: vec![],
            flags,
            description: Some("涉中等制裁名单".into()),
        };
        let result = dowjones_sanctions("Kalinin Machine Plant JSC", Some(&row), Utc::now());
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.reason["mid_sanctions_list"].as_array().unwrap().len(), 1);
        assert_eq!(result.reason["flags"]["is_san"], json!("1"));
        assert_eq!(result.description, "涉中等制裁名单");
    }

    #[test]
    fn dowjones_miss_is_clean() {
        let result = dowjones_sanctions("Unknown Co", None, Utc::now());
        assert_eq!(result.level, RiskLevel::None);
        assert!(result.reason.is_empty());
    }

    #[test]
    fn country_membership_levels() {
        let now = Utc::now();
        let hit = country_membership(CheckId::CargoOriginCountry, Some("Iran"), true, now);
        assert_eq!(hit.level, RiskLevel::High);
        let miss = country_membership(CheckId::PortCountry, Some("Singapore"), false, now);
        assert_eq!(miss.level, RiskLevel::None);
        let empty = country_membership(CheckId::CargoOriginCountry, None, false, now);
        assert_eq!(empty.level, RiskLevel::None);
        assert!(empty.reason.is_empty());
    }

    #[test]
    fn stakeholder_screening_lloyds_reduces_to_worst() {
        let mut intel = base_intel();
        intel.compliance = Slot::Ready(vec![
            serde_json::from_value(json!({
                "StakeholderType": "Registered owner",
                "Name": "Acme Shipping",
                "SanctionRiskLevel": "No risk"
            }))
            .expect("record"),
            serde_json::from_value(json!({
                "StakeholderType": "Operator",
                "Name": "Dark Fleet Ltd",
                "SanctionRiskLevel": "Sanctioned"
            }))
            .expect("record"),
        ]);
        let (result, entries) = stakeholder_screening_lloyds(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, RiskLevel::None);
        assert_eq!(entries[1].level, RiskLevel::High);
    }

    #[test]
    fn stakeholder_screening_kpler_lists_sanctioned_companies() {
        let mut intel = base_intel();
        intel.screening = Slot::Ready(vec![serde_json::from_value(json!({
            "imo": 9842190,
            "complianceRisk": "Risks detected",
            "sanctionedCompanies": [{"name": "Acme Marine", "relationship": "operator"}]
        }))
        .expect("record")]);
        let (result, entries) = stakeholder_screening_kpler(&intel, Utc::now());
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Acme Marine");
    }
}
