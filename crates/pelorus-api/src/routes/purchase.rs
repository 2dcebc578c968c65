//! # Vessel Purchase Screening Route
//!
//! `POST /purchase/vessel_purchase_risk`. Purchase screenings carry the
//! widest counterparty set and a seller fleet list; each fleet vessel is
//! screened against sanctions, provider risk, and the watchlist.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use pelorus_screening::session::ScreeningRequest;
use pelorus_screening::verdict::OperatorInfo;
use pelorus_screening::{OperationVerdict, Vertical};

use crate::error::AppError;
use crate::orchestrate;
use crate::routes::{parse_imo, parse_uuid, FleetEntryDto, NameInput};
use crate::state::AppState;

/// Vessel purchase screening request.
#[derive(Debug, Deserialize)]
pub struct PurchaseScreenRequest {
    pub uuid: String,
    #[serde(default)]
    pub process_id: Option<String>,
    #[serde(default)]
    pub process_operator_id: Option<String>,
    #[serde(default)]
    pub process_operator_name: Option<String>,

    pub vessel_name: String,
    pub vessel_imo: String,

    pub purchaser: String,
    pub vessel_seller: String,
    #[serde(default)]
    pub vessel_owner: NameInput,
    #[serde(default)]
    pub vessel_legal_holder: Option<String>,
    #[serde(default)]
    pub shipbuilding_party: Option<String>,
    #[serde(default)]
    pub agent: Vec<String>,
    #[serde(default)]
    pub financial_institution: Vec<String>,
    #[serde(default)]
    pub vessel_insurer: Vec<String>,
    #[serde(default)]
    pub legal_advisor: Vec<String>,
    #[serde(default)]
    pub vessel_manager: NameInput,
    #[serde(default)]
    pub vessel_final_beneficiary: NameInput,
    #[serde(default)]
    pub vessel_operator: NameInput,
    #[serde(default)]
    pub vessel_seller_fleet_supplied: Vec<FleetEntryDto>,
}

impl PurchaseScreenRequest {
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
            ("purchaser".to_string(), single(Some(self.purchaser))),
            ("vessel_seller".to_string(), single(Some(self.vessel_seller))),
            ("vessel_owner".to_string(), self.vessel_owner.into_names()),
            ("vessel_legal_holder".to_string(), single(self.vessel_legal_holder)),
            ("shipbuilding_party".to_string(), single(self.shipbuilding_party)),
            ("agent".to_string(), list(self.agent)),
            ("financial_institution".to_string(), list(self.financial_institution)),
            ("vessel_insurer".to_string(), list(self.vessel_insurer)),
            ("legal_advisor".to_string(), list(self.legal_advisor)),
            ("vessel_manager".to_string(), self.vessel_manager.into_names()),
            (
                "vessel_final_beneficiary".to_string(),
                self.vessel_final_beneficiary.into_names(),
            ),
            ("vessel_operator".to_string(), self.vessel_operator.into_names()),
        ];

        Ok(ScreeningRequest {
            vertical: Vertical::VesselPurchase,
            uuid: parse_uuid(&self.uuid)?,
            voyage_number: self.process_id.unwrap_or_default(),
            vessel_imo: imo,
            vessel_name: self.vessel_name,
            cargo_origin: None,
            port_country: None,
            roles,
            fleet: self
                .vessel_seller_fleet_supplied
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

/// Build the purchase router.
pub fn router() -> Router<AppState> {
    Router::new().route("/purchase/vessel_purchase_risk", post(risk_screen))
}

async fn risk_screen(
    State(state): State<AppState>,
    Json(request): Json<PurchaseScreenRequest>,
) -> Result<Json<OperationVerdict>, AppError> {
    let screening = request.into_screening()?;
    tracing::info!(
        uuid = %screening.uuid,
        fleet = screening.fleet.len(),
        "vessel purchase screening started"
    );
    let verdict = orchestrate::screen(&state, screening).await?;
    Ok(Json(verdict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn purchase_request_requires_imo_and_maps_fleet() {
        let raw = json!({
            "uuid": "3b6157f4-e262-45cd-8a90-cfbd06640521",
            "vessel_name": "Coral Trader",
            "vessel_imo": "9842190",
            "purchaser": "Buyer Co",
            "vessel_seller": "Seller Co",
            "vessel_owner": "Owner Co",
            "shipbuilding_party": "Yard Co",
            "agent": ["Agent A"],
            "vessel_manager": "Manager Co",
            "vessel_final_beneficiary": "UBO Co",
            "vessel_operator": "Operator Co",
            "vessel_seller_fleet_supplied": [
                {"vessel_name": "Fleet One", "vessel_imo": "9700001"},
                {"vessel_name": "Fleet Two", "vessel_imo": ""}
            ]
        });
        let request: PurchaseScreenRequest = serde_json::from_value(raw).expect("decode");
        let screening = request.into_screening().expect("convert");
        assert_eq!(screening.vertical, Vertical::VesselPurchase);
        assert_eq!(screening.fleet.len(), 2);
        assert!(screening.fleet[0].imo.is_some());
        assert!(screening.fleet[1].imo.is_none());
        assert_eq!(screening.roles.len(), Vertical::VesselPurchase.roles().len());
    }

    #[test]
    fn missing_imo_is_rejected() {
        let raw = json!({
            "uuid": "3b6157f4-e262-45cd-8a90-cfbd06640521",
            "vessel_name": "Coral Trader",
            "vessel_imo": " ",
            "purchaser": "Buyer Co",
            "vessel_seller": "Seller Co"
        });
        let request: PurchaseScreenRequest = serde_json::from_value(raw).expect("decode");
        assert!(request.into_screening().is_err());
    }
}
