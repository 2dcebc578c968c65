//! # Intelligence-B Client ("Kpler")
//!
//! Two endpoints: a bulk risk POST taking an array of integer IMOs with a
//! date window, and a compliance-screening GET. Responses are bare JSON
//! (no envelope), camelCase.
//!
//! The bulk endpoint's IMO list is sorted before the request is keyed and
//! sent, so `[A, B]` and `[B, A]` coalesce onto one cache slot.

use std::time::Duration;

use serde_json::Value;

use pelorus_core::{DateWindow, Imo};

use crate::cache::{CacheKey, SessionCache};
use crate::error::IntelError;
use crate::retry::retry_send;
use crate::types::{KplerScreeningRecord, KplerVesselRisk};

/// Timeout for the bulk risks POST (the provider computes per-vessel
/// aggregates server-side; this is the slow path).
const RISKS_TIMEOUT_SECS: u64 = 120;

/// Timeout for the screening GET.
const SCREENING_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Intelligence-B adapter.
#[derive(Debug, Clone)]
pub struct KplerConfig {
    /// Base URL for the compliance-screening endpoint.
    pub base_url: String,
    /// Full URL of the bulk vessel-risks endpoint.
    pub risks_url: String,
    /// Bearer token.
    pub token: String,
}

impl KplerConfig {
    /// Create a new configuration.
    pub fn new(
        base_url: impl Into<String>,
        risks_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            risks_url: risks_url.into(),
            token: token.into(),
        }
    }
}

/// Typed client for the Intelligence-B provider.
#[derive(Debug)]
pub struct KplerClient {
    http: reqwest::Client,
    base_url: String,
    risks_url: String,
}

impl KplerClient {
    /// Build the client from configuration.
    pub fn new(config: KplerConfig) -> Result<Self, IntelError> {
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
            risks_url: config.risks_url,
        })
    }

    /// Bulk vessel risks for a set of IMOs over the window.
    pub async fn vessel_risks(
        &self,
        cache: &SessionCache,
        imos: &[Imo],
        window: &DateWindow,
    ) -> Result<Vec<KplerVesselRisk>, IntelError> {
        let endpoint = "POST /vessels/risks".to_string();
        let mut numeric: Vec<u32> = imos.iter().map(Imo::as_u32).collect();
        numeric.sort_unstable();
        let body = serde_json::json!(numeric);

        let start = window.start_iso();
        let end = window.end_iso();
        let params = [("startDate", start.as_str()), ("endDate", end.as_str())];
        let key = CacheKey::new("POST", &self.risks_url, &params, Some(&body));

        let raw = cache
            .get_or_fetch(key, || async {
                let resp = retry_send(&endpoint, RISKS_TIMEOUT_SECS, || {
                    self.http
                        .post(&self.risks_url)
                        .query(&params)
                        .json(&body)
                        .timeout(Duration::from_secs(RISKS_TIMEOUT_SECS))
                        .send()
                })
                .await?;
                Self::decode_response(resp, &endpoint).await
            })
            .await?;

        serde_json::from_value(raw).map_err(|e| IntelError::Decode {
            endpoint,
            detail: e.to_string(),
        })
    }

    /// Compliance screening for one vessel.
    pub async fn compliance_screening(
        &self,
        cache: &SessionCache,
        imo: &Imo,
    ) -> Result<Vec<KplerScreeningRecord>, IntelError> {
        let endpoint = "GET /compliance/compliance-screening".to_string();
        let url = format!("{}/compliance/compliance-screening", self.base_url);
        let params = [("vessels", imo.as_str())];
        let key = CacheKey::new("GET", &url, &params, None);

        let raw = cache
            .get_or_fetch(key, || async {
                let resp = retry_send(&endpoint, SCREENING_TIMEOUT_SECS, || {
                    self.http
                        .get(&url)
                        .query(&params)
                        .timeout(Duration::from_secs(SCREENING_TIMEOUT_SECS))
                        .send()
                })
                .await?;
                Self::decode_response(resp, &endpoint).await
            })
            .await?;

        serde_json::from_value(raw).map_err(|e| IntelError::Decode {
            endpoint,
            detail: e.to_string(),
        })
    }

    /// Common status handling: 403 is a distinct credential failure.
    async fn decode_response(
        resp: reqwest::Response,
        endpoint: &str,
    ) -> Result<Value, IntelError> {
        let status = resp.status();
        if status.as_u16() == 403 {
            let body = resp.text().await.unwrap_or_default();
            return Err(IntelError::AuthDenied {
                endpoint: endpoint.to_string(),
                body: body.chars().take(500).collect(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IntelError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }
        resp.json::<Value>().await.map_err(|e| IntelError::Decode {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })
    }
}
