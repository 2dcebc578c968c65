//! # Second-Hand Disposal Screening Route
//!
//! `POST /second_hand/vessel_disposal_risk`. Disposal screenings cover
//! the intended transferee chain (shareholders and controllers) and the
//! transferee's supplied fleet.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use pelorus_screening::session::ScreeningRequest;
use pelorus_screening::verdict::OperatorInfo;
use pelorus_screening::{OperationVerdict, Vertical};

use crate::error::AppError;
use crate::orchestrate;
use crate::routes::{parse_imo, parse_uuid, FleetEntryDto};
use crate::state::AppState;

/// Second-hand disposal screening request.
#[derive(Debug, Deserialize)]
pub struct DisposalScreenRequest {
    pub uuid: String,
    #[serde(default)]
    pub process_id: Option<String>,
    #[serde(default)]
    pub process_operator_id: Option<String>,
    #[serde(default)]
    pub process_operator_name: Option<String>,

    pub vessel_name: String,
    pub vessel_imo: String,

    pub intent_transferee: String,
    #[serde(default)]
    pub intent_transferee_shareholder: Vec<String>,
    #[serde(default)]
    pub intent_transferee_controller: Option<String>,
    #[serde(default)]
    pub intent_vessel_manager: Option<String>,
    #[serde(default)]
    pub intent_vessel_manager_shareholder: Vec<String>,
    #[serde(default)]
    pub vessel_manager_controller: Option<String>,
    #[serde(default)]
    pub vessel_operator: Option<String>,
    #[serde(default)]
    pub agent: Vec<String>,
    #[serde(default)]
    pub intent_transferee_fleet_supplied: Vec<FleetEntryDto>,
    #[serde(default)]
    pub vessel_owner_supplied: Vec<String>,
    #[serde(default)]
    pub vessel_manager_supplied: Vec<String>,
}

impl DisposalScreenRequest {
    fn into_screening(self) -> Result<ScreeningRequest, AppError> {
        let imo = parse_imo(Some(&self.vessel_imo), true)?;

        let single = |name: Option<String>| -> Vec<String> {
            name.map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .into_iter()
                .collect()
        };
        let list = |names: Vec<String>| -> Vec<String> {
            names
                .into_iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect()
        };

        let roles = vec![
            ("intent_transferee".to_string(), single(Some(self.intent_transferee))),
            (
                "intent_transferee_shareholder".to_string(),
                list(self.intent_transferee_shareholder),
            ),
            (
                "intent_transferee_controller".to_string(),
                single(self.intent_transferee_controller),
            ),
            ("intent_vessel_manager".to_string(), single(self.intent_vessel_manager)),
            (
                "intent_vessel_manager_shareholder".to_string(),
                list(self.intent_vessel_manager_shareholder),
            ),
            (
                "vessel_manager_controller".to_string(),
                single(self.vessel_manager_controller),
            ),
            ("vessel_operator".to_string(), single(self.vessel_operator)),
            ("agent".to_string(), list(self.agent)),
            ("vessel_owner_supplied".to_string(), list(self.vessel_owner_supplied)),
            ("vessel_manager_supplied".to_string(), list(self.vessel_manager_supplied)),
        ];

        Ok(ScreeningRequest {
            vertical: Vertical::SecondHandDisposal,
            uuid: parse_uuid(&self.uuid)?,
            voyage_number: self.process_id.unwrap_or_default(),
            vessel_imo: imo,
            vessel_name: self.vessel_name,
            cargo_origin: None,
            port_country: None,
            roles,
            fleet: self
                .intent_transferee_fleet_supplied
                .into_iter()
                .map(FleetEntryDto::into_ref)
                .collect(),
            operator: OperatorInfo {
                operator_id: self.process_operator_id.unwrap_or_default(),
                operator_name: self.process_operator_name.unwrap_or_default(),
                operator_department: String::new(),
                operator_time: String::new(),
            },
        })
    }
}

/// Build the disposal router.
pub fn router() -> Router<AppState> {
    Router::new().route("/second_hand/vessel_disposal_risk", post(risk_screen))
}

async fn risk_screen(
    State(state): State<AppState>,
    Json(request): Json<DisposalScreenRequest>,
) -> Result<Json<OperationVerdict>, AppError> {
    let screening = request.into_screening()?;
    tracing::info!(uuid = %screening.uuid, "second-hand disposal screening started");
    let verdict = orchestrate::screen(&state, screening).await?;
    Ok(Json(verdict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn disposal_request_converts_with_all_roles() {
        let raw = json!({
            "uuid": "5f0c9a1e-4d6b-41f7-9e2a-8c3d7b6a5e40",
            "vessel_name": "Old Carrier",
            "vessel_imo": "9842190",
            "intent_transferee": "New Owner Co",
            "intent_transferee_shareholder": ["Shareholder A", "Shareholder B"],
            "intent_transferee_controller": "Controller Co",
            "intent_vessel_manager": "Manager Co",
            "agent": ["Agent A"],
            "intent_transferee_fleet_supplied": [
                {"vessel_name": "Fleet One", "vessel_imo": "9700001"}
            ],
            "vessel_owner_supplied": ["Historic Owner"],
            "vessel_manager_supplied": []
        });
        let request: DisposalScreenRequest = serde_json::from_value(raw).expect("decode");
        let screening = request.into_screening().expect("convert");
        assert_eq!(screening.vertical, Vertical::SecondHandDisposal);
        assert_eq!(screening.roles.len(), Vertical::SecondHandDisposal.roles().len());
        let shareholders = screening
            .roles
            .iter()
            .find(|(k, _)| k == "intent_transferee_shareholder")
            .unwrap();
        assert_eq!(shareholders.1.len(), 2);
        assert_eq!(screening.fleet.len(), 1);
    }
}
