//! # Bulk Vessel Prefetch
//!
//! One screening session needs up to seven provider calls for its vessel.
//! [`prefetch_vessel_intel`] issues all of them concurrently through the
//! session cache and collects the decoded responses into a [`VesselIntel`]
//! bundle. Downstream evaluators are pure functions over this bundle —
//! they never touch the network.
//!
//! A failed endpoint degrades to a [`Slot::Failed`] carrying the error
//! text; the screening continues and the failure surfaces in that check's
//! evidence, never as a session abort.

use pelorus_core::{DateWindow, Imo};

use crate::cache::SessionCache;
use crate::kpler::KplerClient;
use crate::lloyds::LloydsClient;
use crate::types::{
    AdvancedRiskRecord, ComplianceStakeholder, KplerScreeningRecord, KplerVesselRisk,
    RiskScoreRecord, SanctionRecord, VoyageEvent,
};

/// One prefetched endpoint's outcome.
#[derive(Debug, Clone)]
pub enum Slot<T> {
    /// Endpoint responded and decoded.
    Ready(T),
    /// Endpoint failed; the error text is carried into check evidence.
    Failed(String),
}

impl<T> Slot<T> {
    /// The decoded records, if the slot is ready.
    pub fn records(&self) -> Option<&T> {
        match self {
            Self::Ready(records) => Some(records),
            Self::Failed(_) => None,
        }
    }

    /// The failure text, if the slot failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(detail) => Some(detail),
        }
    }

    fn from_result<E: std::fmt::Display>(label: &str, result: Result<T, E>) -> Self {
        match result {
            Ok(records) => Self::Ready(records),
            Err(e) => {
                tracing::warn!(endpoint = label, "prefetch slot failed: {e}");
                Self::Failed(e.to_string())
            }
        }
    }
}

impl<T: Default> Slot<T> {
    /// An empty, successful slot (used when screening has no vessel IMO).
    pub fn empty() -> Self {
        Self::Ready(T::default())
    }
}

/// All cached provider data for one vessel over one window.
#[derive(Debug, Clone)]
pub struct VesselIntel {
    /// The screened vessel.
    pub imo: Option<Imo>,
    /// The window the date-ranged endpoints were queried over.
    pub window: DateWindow,
    /// Intelligence-A stakeholder compliance screening.
    pub compliance: Slot<Vec<ComplianceStakeholder>>,
    /// Intelligence-A risk score.
    pub risk_score: Slot<Vec<RiskScoreRecord>>,
    /// Intelligence-A sanctions records.
    pub sanctions: Slot<Vec<SanctionRecord>>,
    /// Intelligence-A advanced compliance risk items.
    pub advanced_risk: Slot<Vec<AdvancedRiskRecord>>,
    /// Intelligence-A voyage events.
    pub voyage_events: Slot<Vec<VoyageEvent>>,
    /// Intelligence-B bulk vessel risks.
    pub vessel_risks: Slot<Vec<KplerVesselRisk>>,
    /// Intelligence-B compliance screening.
    pub screening: Slot<Vec<KplerScreeningRecord>>,
}

impl VesselIntel {
    /// A bundle with every slot empty, for screenings without a vessel
    /// IMO. Checks evaluated against it classify as no-risk with empty
    /// evidence, which is the contract for missing inputs.
    pub fn empty(window: DateWindow) -> Self {
        Self {
            imo: None,
            window,
            compliance: Slot::empty(),
            risk_score: Slot::empty(),
            sanctions: Slot::empty(),
            advanced_risk: Slot::empty(),
            voyage_events: Slot::empty(),
            vessel_risks: Slot::empty(),
            screening: Slot::empty(),
        }
    }
}

/// Warm the session cache for a vessel: all five Intelligence-A calls and
/// both Intelligence-B calls, concurrently, once.
pub async fn prefetch_vessel_intel(
    lloyds: &LloydsClient,
    kpler: &KplerClient,
    cache: &SessionCache,
    imo: &Imo,
    window: DateWindow,
) -> VesselIntel {
    tracing::info!(imo = %imo, range = %window.as_range_param(), "prefetching vessel intel");

    let bulk = std::slice::from_ref(imo);
    let (compliance, risk_score, sanctions, advanced_risk, voyage_events, vessel_risks, screening) = tokio::join!(
        lloyds.compliance_screening(cache, imo, &window),
        lloyds.risk_score(cache, imo, &window),
        lloyds.sanctions(cache, imo),
        lloyds.advanced_compliance_risk(cache, imo),
        lloyds.voyage_events(cache, imo, &window),
        kpler.vessel_risks(cache, bulk, &window),
        kpler.compliance_screening(cache, imo),
    );

    VesselIntel {
        imo: Some(imo.clone()),
        window,
        compliance: Slot::from_result("vesselcompliancescreening_v3", compliance),
        risk_score: Slot::from_result("vesselriskscore", risk_score),
        sanctions: Slot::from_result("vesselsanctions_v2", sanctions),
        advanced_risk: Slot::from_result("vesseladvancedcompliancerisk_v3", advanced_risk),
        voyage_events: Slot::from_result("vesselvoyageevents", voyage_events),
        vessel_risks: Slot::from_result("vessels/risks", vessel_risks),
        screening: Slot::from_result("compliance-screening", screening),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpler::KplerConfig;
    use crate::lloyds::LloydsConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lloyds_body() -> serde_json::Value {
        json!({"IsSuccess": true, "Data": {"Items": []}})
    }

    #[tokio::test]
    async fn prefetch_fills_every_slot() {
        let server = MockServer::start().await;
        for endpoint in [
            "/vesselcompliancescreening_v3",
            "/vesselriskscore",
            "/vesselsanctions_v2",
            "/vesseladvancedcompliancerisk_v3",
            "/vesselvoyageevents",
        ] {
            Mock::given(method("GET"))
                .and(path(endpoint))
                .respond_with(ResponseTemplate::new(200).set_body_json(lloyds_body()))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path("/vessels/risks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/compliance/compliance-screening"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let lloyds =
            LloydsClient::new(LloydsConfig::new(server.uri(), "t")).expect("lloyds client");
        let kpler = KplerClient::new(KplerConfig::new(
            server.uri(),
            format!("{}/vessels/risks", server.uri()),
            "t",
        ))
        .expect("kpler client");

        let cache = SessionCache::new();
        let imo = Imo::new("9842190").expect("imo");
        let window = DateWindow::parse("2024-08-25", "2025-08-25").expect("window");

        let intel = prefetch_vessel_intel(&lloyds, &kpler, &cache, &imo, window).await;
        assert!(intel.compliance.records().is_some());
        assert!(intel.risk_score.records().is_some());
        assert!(intel.sanctions.records().is_some());
        assert!(intel.advanced_risk.records().is_some());
        assert!(intel.voyage_events.records().is_some());
        assert!(intel.vessel_risks.records().is_some());
        assert!(intel.screening.records().is_some());
        assert_eq!(cache.resolved_len().await, 7);
    }

    #[tokio::test]
    async fn failed_endpoint_degrades_to_failed_slot() {
        let server = MockServer::start().await;
        for endpoint in [
            "/vesselcompliancescreening_v3",
            "/vesselriskscore",
            "/vesseladvancedcompliancerisk_v3",
            "/vesselvoyageevents",
        ] {
            Mock::given(method("GET"))
                .and(path(endpoint))
                .respond_with(ResponseTemplate::new(200).set_body_json(lloyds_body()))
                .mount(&server)
                .await;
        }
        // Sanctions endpoint denies access.
        Mock::given(method("GET"))
            .and(path("/vesselsanctions_v2"))
            .respond_with(ResponseTemplate::new(403).set_body_string("no entitlement"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/vessels/risks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/compliance/compliance-screening"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let lloyds =
            LloydsClient::new(LloydsConfig::new(server.uri(), "t")).expect("lloyds client");
        let kpler = KplerClient::new(KplerConfig::new(
            server.uri(),
            format!("{}/vessels/risks", server.uri()),
            "t",
        ))
        .expect("kpler client");

        let cache = SessionCache::new();
        let imo = Imo::new("9842190").expect("imo");
        let window = DateWindow::parse("2024-08-25", "2025-08-25").expect("window");

        let intel = prefetch_vessel_intel(&lloyds, &kpler, &cache, &imo, window).await;
        let failure = intel.sanctions.failure().expect("sanctions slot failed");
        assert!(failure.contains("403"), "got: {failure}");
        // Other slots are unaffected.
        assert!(intel.risk_score.records().is_some());
    }

    #[test]
    fn empty_bundle_has_ready_empty_slots() {
        let window = DateWindow::parse("2024-08-25", "2025-08-25").expect("window");
        let intel = VesselIntel::empty(window);
        assert!(intel.imo.is_none());
        assert_eq!(intel.sanctions.records().map(Vec::len), Some(0));
        assert!(intel.voyage_events.failure().is_none());
    }
}
