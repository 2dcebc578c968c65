//! # Intelligence-A Client ("Lloyds")
//!
//! Vessel-centric, date-windowed provider with five endpoints. All calls
//! are GET with query parameters, authenticated by bearer token, and
//! wrapped in the `{IsSuccess, Data: {Items}}` envelope.
//!
//! Every method routes through the [`SessionCache`]: the raw decoded JSON
//! is cached under the canonical request key before envelope unwrapping,
//! so concurrent checks wanting the same endpoint share one outbound call.

use std::time::Duration;

use serde_json::Value;

use pelorus_core::{DateWindow, Imo};

use crate::cache::{CacheKey, SessionCache};
use crate::error::IntelError;
use crate::retry::retry_send;
use crate::types::{
    AdvancedRiskRecord, ComplianceStakeholder, LloydsEnvelope, RiskScoreRecord, SanctionRecord,
    VoyageEvent,
};

/// Short per-call timeout for lookup-style endpoints.
const LOOKUP_TIMEOUT_SECS: u64 = 60;

/// Long per-call timeout for the heavy voyage/advanced-risk endpoints.
const HEAVY_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Intelligence-A adapter.
#[derive(Debug, Clone)]
pub struct LloydsConfig {
    /// Base URL of the provider API.
    pub base_url: String,
    /// Bearer token.
    pub token: String,
}

impl LloydsConfig {
    /// Create a new configuration.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }
}

/// Typed client for the Intelligence-A provider.
#[derive(Debug)]
pub struct LloydsClient {
    http: reqwest::Client,
    base_url: String,
}

impl LloydsClient {
    /// Build the client from configuration.
    pub fn new(config: LloydsConfig) -> Result<Self, IntelError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.token)).map_err(
                |_| IntelError::Decode {
                    endpoint: "client construction".into(),
                    detail: "bearer token contains invalid header characters".into(),
                },
            )?,
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| IntelError::Http {
                endpoint: "client construction".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET an endpoint through the session cache, returning decoded JSON.
    async fn get_cached(
        &self,
        cache: &SessionCache,
        path: &str,
        params: &[(&str, &str)],
        timeout_secs: u64,
    ) -> Result<Value, IntelError> {
        let url = format!("{}/{}", self.base_url, path);
        let endpoint = format!("GET /{path}");
        let key = CacheKey::new("GET", &url, params, None);

        cache
            .get_or_fetch(key, || async {
                let resp = retry_send(&endpoint, timeout_secs, || {
                    self.http
                        .get(&url)
                        .query(params)
                        .timeout(Duration::from_secs(timeout_secs))
                        .send()
                })
                .await?;

                let status = resp.status();
                if status.as_u16() == 403 {
                    let body = resp.text().await.unwrap_or_default();
                    return Err(IntelError::AuthDenied {
                        endpoint: endpoint.clone(),
                        body: body.chars().take(500).collect(),
                    });
                }
                if !status.is_success() {
                    let body = resp.text().await.unwrap_or_default();
                    return Err(IntelError::Api {
                        endpoint: endpoint.clone(),
                        status: status.as_u16(),
                        body: body.chars().take(500).collect(),
                    });
                }

                resp.json::<Value>().await.map_err(|e| IntelError::Decode {
                    endpoint: endpoint.clone(),
                    detail: e.to_string(),
                })
            })
            .await
    }

    /// Decode a cached raw response through the provider envelope.
    fn unwrap_envelope<T: serde::de::DeserializeOwned>(
        path: &str,
        raw: Value,
    ) -> Result<Vec<T>, IntelError> {
        let envelope: LloydsEnvelope<T> =
            serde_json::from_value(raw).map_err(|e| IntelError::Decode {
                endpoint: format!("GET /{path}"),
                detail: e.to_string(),
            })?;
        Ok(envelope.into_items())
    }

    /// Vessel compliance screening: stakeholder sanction classifications.
    pub async fn compliance_screening(
        &self,
        cache: &SessionCache,
        imo: &Imo,
        window: &DateWindow,
    ) -> Result<Vec<ComplianceStakeholder>, IntelError> {
        let range = window.as_range_param();
        let raw = self
            .get_cached(
                cache,
                "vesselcompliancescreening_v3",
                &[("vesselImo", imo.as_str()), ("voyageDateRange", &range)],
                LOOKUP_TIMEOUT_SECS,
            )
            .await?;
        Self::unwrap_envelope("vesselcompliancescreening_v3", raw)
    }

    /// Vessel risk score over the window.
    pub async fn risk_score(
        &self,
        cache: &SessionCache,
        imo: &Imo,
        window: &DateWindow,
    ) -> Result<Vec<RiskScoreRecord>, IntelError> {
        let range = window.as_range_param();
        let raw = self
            .get_cached(
                cache,
                "vesselriskscore",
                &[("vesselImo", imo.as_str()), ("voyageDateRange", &range)],
                LOOKUP_TIMEOUT_SECS,
            )
            .await?;
        Self::unwrap_envelope("vesselriskscore", raw)
    }

    /// Vessel sanctions history (current and ended records).
    pub async fn sanctions(
        &self,
        cache: &SessionCache,
        imo: &Imo,
    ) -> Result<Vec<SanctionRecord>, IntelError> {
        let raw = self
            .get_cached(
                cache,
                "vesselsanctions_v2",
                &[("vesselImo", imo.as_str())],
                LOOKUP_TIMEOUT_SECS,
            )
            .await?;
        Self::unwrap_envelope("vesselsanctions_v2", raw)
    }

    /// Advanced compliance risk items (AIS manipulation and friends).
    pub async fn advanced_compliance_risk(
        &self,
        cache: &SessionCache,
        imo: &Imo,
    ) -> Result<Vec<AdvancedRiskRecord>, IntelError> {
        let raw = self
            .get_cached(
                cache,
                "vesseladvancedcompliancerisk_v3",
                &[("vesselImo", imo.as_str())],
                HEAVY_TIMEOUT_SECS,
            )
            .await?;
        Self::unwrap_envelope("vesseladvancedcompliancerisk_v3", raw)
    }

    /// Voyage events over the window, with per-voyage risk tags.
    pub async fn voyage_events(
        &self,
        cache: &SessionCache,
        imo: &Imo,
        window: &DateWindow,
    ) -> Result<Vec<VoyageEvent>, IntelError> {
        let range = window.as_range_param();
        let raw = self
            .get_cached(
                cache,
                "vesselvoyageevents",
                &[("vesselImo", imo.as_str()), ("voyageDateRange", &range)],
                HEAVY_TIMEOUT_SECS,
            )
            .await?;
        Self::unwrap_envelope("vesselvoyageevents", raw)
    }
}
