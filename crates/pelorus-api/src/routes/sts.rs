//! # STS Bunkering Screening Route
//!
//! `POST /sts/risk_screen`. The screening subject is the transfer vessel
//! when one is supplied, otherwise the operation's own vessel. The
//! operating water area feeds the port-country check and the cargo
//! origin feeds the cargo-origin-country check.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use pelorus_screening::session::ScreeningRequest;
use pelorus_screening::verdict::OperatorInfo;
use pelorus_screening::{OperationVerdict, Vertical};

use crate::error::AppError;
use crate::orchestrate;
use crate::routes::{parse_imo, parse_uuid, NameInput};
use crate::state::AppState;

/// STS bunkering screening request.
#[derive(Debug, Deserialize)]
pub struct StsScreenRequest {
    pub uuid: String,
    #[serde(default)]
    pub process_id: Option<String>,
    #[serde(default)]
    pub process_operator_id: Option<String>,
    #[serde(default)]
    pub process_operator_name: Option<String>,
    #[serde(default)]
    pub business_segment: Option<String>,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub business_model: Option<String>,
    #[serde(default)]
    pub operate_water_area: Option<String>,
    #[serde(default)]
    pub expected_execution_date: Option<String>,
    #[serde(default)]
    pub cargo_origin: Option<String>,
    #[serde(default)]
    pub is_port_sts: Option<String>,

    pub vessel_name: String,
    #[serde(default)]
    pub vessel_imo: Option<String>,
    #[serde(default)]
    pub vessel_number: Option<String>,
    #[serde(default)]
    pub vessel_transfer_imo: Option<String>,
    #[serde(default)]
    pub vessel_transfer_name: Option<String>,

    pub charterers: String,
    #[serde(default)]
    pub consignee: Vec<String>,
    #[serde(default)]
    pub consignor: Vec<String>,
    #[serde(default)]
    pub agent: Vec<String>,
    #[serde(default)]
    pub vessel_broker: Vec<String>,
    #[serde(default)]
    pub vessel_owner: NameInput,
    #[serde(default)]
    pub vessel_manager: NameInput,
    #[serde(default)]
    pub vessel_operator: NameInput,
}

impl StsScreenRequest {
    fn into_screening(self) -> Result<ScreeningRequest, AppError> {
        // The transfer vessel is the screening subject when supplied.
        let subject_imo = match self.vessel_transfer_imo.as_deref().map(str::trim) {
            Some(imo) if !imo.is_empty() => parse_imo(Some(imo), false)?,
            _ => parse_imo(self.vessel_imo.as_deref(), false)?,
        };

        let roles = vec![
            ("charterers".to_string(), trimmed_one(&self.charterers)),
            ("consignee".to_string(), trimmed_list(self.consignee)),
            ("consignor".to_string(), trimmed_list(self.consignor)),
            ("agent".to_string(), trimmed_list(self.agent)),
            ("vessel_broker".to_string(), trimmed_list(self.vessel_broker)),
            ("vessel_owner".to_string(), self.vessel_owner.into_names()),
            ("vessel_manager".to_string(), self.vessel_manager.into_names()),
            ("vessel_operator".to_string(), self.vessel_operator.into_names()),
        ];

        Ok(ScreeningRequest {
            vertical: Vertical::StsBunkering,
            uuid: parse_uuid(&self.uuid)?,
            voyage_number: self.process_id.unwrap_or_default(),
            vessel_imo: subject_imo,
            vessel_name: self.vessel_name,
            cargo_origin: self.cargo_origin.filter(|c| !c.trim().is_empty()),
            port_country: self.operate_water_area.filter(|c| !c.trim().is_empty()),
            roles,
            fleet: Vec::new(),
            operator: OperatorInfo {
                operator_id: self.process_operator_id.unwrap_or_default(),
                operator_name: self.process_operator_name.unwrap_or_default(),
                operator_department: String::new(),
                operator_time: String::new(),
            },
        })
    }
}

fn trimmed_one(name: &str) -> Vec<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    }
}

fn trimmed_list(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Build the STS router.
pub fn router() -> Router<AppState> {
    Router::new().route("/sts/risk_screen", post(risk_screen))
}

async fn risk_screen(
    State(state): State<AppState>,
    Json(request): Json<StsScreenRequest>,
) -> Result<Json<OperationVerdict>, AppError> {
    let screening = request.into_screening()?;
    tracing::info!(
        uuid = %screening.uuid,
        imo = %screening.vessel_imo.as_ref().map(ToString::to_string).unwrap_or_default(),
        "STS bunkering screening started"
    );
    let verdict = orchestrate::screen(&state, screening).await?;
    Ok(Json(verdict))
}
