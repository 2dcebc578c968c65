//! # Warehousing Berth-Call Screening Route
//!
//! `POST /warehousing/risk_screen`. The smallest vertical: four
//! counterparty roles (each accepting one name or a list), plus cargo
//! origin and wharf country feeds for the country checks.

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

/// Warehousing berth-call screening request.
#[derive(Debug, Deserialize)]
pub struct WarehouseScreenRequest {
    pub uuid: String,
    #[serde(default)]
    pub process_id: Option<String>,
    #[serde(default)]
    pub operator_id: Option<String>,
    #[serde(default)]
    pub operator_name: Option<String>,
    #[serde(default)]
    pub operation_start_time: Option<String>,

    pub vessel_name: String,
    pub vessel_imo: String,

    #[serde(default)]
    pub vessel_manager: NameInput,
    #[serde(default)]
    pub vessel_owner: NameInput,
    #[serde(default)]
    pub vessel_final_beneficiary: NameInput,
    #[serde(default)]
    pub vessel_operator: NameInput,

    #[serde(default)]
    pub business_segment: Option<String>,
    #[serde(default)]
    pub cargo_origin: Option<String>,
    #[serde(default)]
    pub wharf_country: Option<String>,
}

impl WarehouseScreenRequest {
    fn into_screening(self) -> Result<ScreeningRequest, AppError> {
        let imo = parse_imo(Some(&self.vessel_imo), true)?;

        let roles = vec![
            ("vessel_manager".to_string(), self.vessel_manager.into_names()),
            ("vessel_owner".to_string(), self.vessel_owner.into_names()),
            (
                "vessel_final_beneficiary".to_string(),
                self.vessel_final_beneficiary.into_names(),
            ),
            ("vessel_operator".to_string(), self.vessel_operator.into_names()),
        ];

        Ok(ScreeningRequest {
            vertical: Vertical::WarehousingBerth,
            uuid: parse_uuid(&self.uuid)?,
            voyage_number: self.process_id.unwrap_or_default(),
            vessel_imo: imo,
            vessel_name: self.vessel_name,
            cargo_origin: self.cargo_origin.filter(|c| !c.trim().is_empty()),
            port_country: self.wharf_country.filter(|c| !c.trim().is_empty()),
            roles,
            fleet: Vec::new(),
            operator: OperatorInfo {
                operator_id: self.operator_id.unwrap_or_default(),
                operator_name: self.operator_name.unwrap_or_default(),
                operator_department: String::new(),
                operator_time: self.operation_start_time.unwrap_or_default(),
            },
        })
    }
}

/// Build the warehousing router.
pub fn router() -> Router<AppState> {
    Router::new().route("/warehousing/risk_screen", post(risk_screen))
}

async fn risk_screen(
    State(state): State<AppState>,
    Json(request): Json<WarehouseScreenRequest>,
) -> Result<Json<OperationVerdict>, AppError> {
    let screening = request.into_screening()?;
    tracing::info!(uuid = %screening.uuid, "warehousing berth screening started");
    let verdict = orchestrate::screen(&state, screening).await?;
    Ok(Json(verdict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn warehouse_roles_accept_string_or_list() {
        let raw = json!({
            "uuid": "7a1b3c5d-9e8f-4a2b-b6c7-d8e9f0a1b2c3",
            "vessel_name": "Harbor Queen",
            "vessel_imo": "9842190",
            "vessel_manager": "Manager Co",
            "vessel_owner": ["Owner A", "Owner B"],
            "cargo_origin": "Iran",
            "wharf_country": "Singapore"
        });
        let request: WarehouseScreenRequest = serde_json::from_value(raw).expect("decode");
        let screening = request.into_screening().expect("convert");
        assert_eq!(screening.vertical, Vertical::WarehousingBerth);
        let owners = screening.roles.iter().find(|(k, _)| k == "vessel_owner").unwrap();
        assert_eq!(owners.1.len(), 2);
        assert_eq!(screening.cargo_origin.as_deref(), Some("Iran"));
        assert_eq!(screening.port_country.as_deref(), Some("Singapore"));
    }
}
