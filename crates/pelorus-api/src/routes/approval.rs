//! # Approval Reconciliation Route
//!
//! `POST /approval/reconcile`. One approval act lists the parties whose
//! risk disposition an operator reviewed; the act is stored (one row per
//! party) and then all approvals for the operation are replayed onto the
//! latest verdict. The reconciled verdict is returned; a change-log
//! revision is appended only when the projection diverged.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use pelorus_screening::OperationVerdict;

use crate::db::approvals::{NewApproval, NewApprovalParty};
use crate::error::AppError;
use crate::orchestrate;
use crate::routes::parse_uuid;
use crate::state::AppState;

/// One reviewed party in an approval act.
#[derive(Debug, Deserialize)]
pub struct ApprovalPartyDto {
    /// Stakeholder role key (matched case-insensitively at replay).
    pub relevant_parties_type: String,
    #[serde(default)]
    pub parties_id: String,
    pub parties_name: String,
    /// Screening status shown to the approver (echo).
    #[serde(default)]
    pub risk_screening_status: String,
    /// The override the approver chose; empty keeps the level.
    #[serde(default)]
    pub risk_change_status: String,
    #[serde(default)]
    pub change_reason: String,
}

/// One approver signature.
#[derive(Debug, Deserialize)]
pub struct ApproverDto {
    #[serde(default)]
    pub approver_id: String,
    #[serde(default)]
    pub approver_name: String,
    #[serde(default)]
    pub approver_time: String,
}

/// Approval submission.
#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    pub uuid: String,
    #[serde(default)]
    pub voyage_number: String,
    #[serde(default)]
    pub vessel_imo: String,
    #[serde(default)]
    pub vessel_name: String,
    pub parties: Vec<ApprovalPartyDto>,
    #[serde(default)]
    pub approval_status: String,
    /// Approval timestamp; accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a
    /// bare ISO date.
    pub approval_date: String,
    #[serde(default)]
    pub applicant_id: String,
    #[serde(default)]
    pub applicant_name: String,
    #[serde(default)]
    pub approvers: Vec<ApproverDto>,
}

/// Parse the approval console's timestamp formats.
pub(crate) fn parse_approval_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(parsed.and_utc());
    }
    if let Ok(parsed) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(AppError::Validation(format!(
        "approval_date {trimmed:?} is not a recognized timestamp"
    )))
}

impl ApprovalRequest {
    fn into_new_approval(self) -> Result<NewApproval, AppError> {
        if self.parties.is_empty() {
            return Err(AppError::Validation("parties must not be empty".into()));
        }
        let approved_at = parse_approval_date(&self.approval_date)?;
        let approvers = json!(self
            .approvers
            .iter()
            .map(|a| {
                json!({
                    "approver_id": a.approver_id,
                    "approver_name": a.approver_name,
                    "approver_time": a.approver_time,
                })
            })
            .collect::<Vec<_>>());

        Ok(NewApproval {
            uuid: parse_uuid(&self.uuid)?,
            voyage_number: self.voyage_number,
            vessel_imo: self.vessel_imo,
            vessel_name: self.vessel_name,
            parties: self
                .parties
                .into_iter()
                .map(|p| NewApprovalParty {
                    role: p.relevant_parties_type,
                    party_id: p.parties_id,
                    name: p.parties_name,
                    screening_status: p.risk_screening_status,
                    override_level: p.risk_change_status,
                    reason: p.change_reason,
                })
                .collect(),
            approval_status: self.approval_status,
            approved_at,
            applicant_id: self.applicant_id,
            applicant_name: self.applicant_name,
            approvers,
        })
    }
}

/// Build the approval router.
pub fn router() -> Router<AppState> {
    Router::new().route("/approval/reconcile", post(reconcile))
}

async fn reconcile(
    State(state): State<AppState>,
    Json(request): Json<ApprovalRequest>,
) -> Result<Json<OperationVerdict>, AppError> {
    let approval = request.into_new_approval()?;
    tracing::info!(
        uuid = %approval.uuid,
        parties = approval.parties.len(),
        "approval reconciliation requested"
    );
    let result = orchestrate::reconcile_approvals(&state, approval).await?;
    Ok(Json(result.verdict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn approval_date_formats() {
        assert!(parse_approval_date("2025-08-30 11:43:09").is_ok());
        assert!(parse_approval_date("2025-08-30T11:43:09Z").is_ok());
        assert!(parse_approval_date("2025-08-30").is_ok());
        assert!(parse_approval_date("30/08/2025").is_err());
        assert!(parse_approval_date("").is_err());
    }

    #[test]
    fn request_converts_one_row_per_party() {
        let raw = json!({
            "uuid": "3b6157f4-e262-45cd-8a90-cfbd06640521",
            "voyage_number": "12935780",
            "vessel_imo": "9842190",
            "vessel_name": "Akademik Gubkin",
            "parties": [
                {
                    "relevant_parties_type": "charterers",
                    "parties_name": "Acme Chartering",
                    "risk_screening_status": "高风险",
                    "risk_change_status": "无风险",
                    "change_reason": "经审批放行"
                },
                {
                    "relevant_parties_type": "consignee",
                    "parties_name": "Receiver Co",
                    "risk_change_status": ""
                }
            ],
            "approval_status": "approved",
            "approval_date": "2025-08-30 11:43:09",
            "applicant_id": "77852",
            "applicant_name": "操作员",
            "approvers": [{"approver_id": "1", "approver_name": "审批人", "approver_time": "2025-08-30 11:43:09"}]
        });
        let request: ApprovalRequest = serde_json::from_value(raw).expect("decode");
        let approval = request.into_new_approval().expect("convert");
        assert_eq!(approval.parties.len(), 2);
        assert_eq!(approval.parties[0].override_level, "无风险");
        assert_eq!(approval.approvers.as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_parties_rejected() {
        let raw = json!({
            "uuid": "3b6157f4-e262-45cd-8a90-cfbd06640521",
            "parties": [],
            "approval_date": "2025-08-30"
        });
        let request: ApprovalRequest = serde_json::from_value(raw).expect("decode");
        assert!(request.into_new_approval().is_err());
    }
}
