//! Approval record persistence.
//!
//! One approval act covers several parties; each party gets its own row
//! in `approval_records`. Reconciliation reads them back ordered by
//! approval date ascending, so replay is deterministic.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use pelorus_screening::reconcile::ApprovalRecord;

/// One party tuple of an approval submission.
#[derive(Debug, Clone)]
pub struct NewApprovalParty {
    /// Stakeholder role key.
    pub role: String,
    /// Party identifier, when the console supplies one.
    pub party_id: String,
    /// Party name.
    pub name: String,
    /// Screening status at approval time (echo from the console).
    pub screening_status: String,
    /// Override level vocabulary.
    pub override_level: String,
    /// Operator-supplied change reason.
    pub reason: String,
}

/// One approval act to append.
#[derive(Debug, Clone)]
pub struct NewApproval {
    /// Operation UUID.
    pub uuid: String,
    /// Business number of the operation.
    pub voyage_number: String,
    /// Subject vessel IMO.
    pub vessel_imo: String,
    /// Subject vessel name.
    pub vessel_name: String,
    /// Parties covered by this act.
    pub parties: Vec<NewApprovalParty>,
    /// Approval workflow status.
    pub approval_status: String,
    /// When the approval was granted.
    pub approved_at: DateTime<Utc>,
    /// Applicant id.
    pub applicant_id: String,
    /// Applicant name.
    pub applicant_name: String,
    /// Approver list, verbatim JSON.
    pub approvers: Value,
}

/// Append one row per party. All rows of one act share the approval
/// metadata.
pub async fn append(pool: &PgPool, approval: &NewApproval) -> Result<(), sqlx::Error> {
    for party in &approval.parties {
        sqlx::query(
            "INSERT INTO approval_records (
                 uuid, voyage_number, vessel_imo, vessel_name,
                 role, party_id, party_name,
                 risk_screening_status, risk_change_status, change_reason,
                 approval_status, approved_at,
                 applicant_id, applicant_name, approvers
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(&approval.uuid)
        .bind(&approval.voyage_number)
        .bind(&approval.vessel_imo)
        .bind(&approval.vessel_name)
        .bind(&party.role)
        .bind(&party.party_id)
        .bind(&party.name)
        .bind(&party.screening_status)
        .bind(&party.override_level)
        .bind(&party.reason)
        .bind(&approval.approval_status)
        .bind(approval.approved_at)
        .bind(&approval.applicant_id)
        .bind(&approval.applicant_name)
        .bind(&approval.approvers)
        .execute(pool)
        .await?;
    }
    tracing::info!(
        uuid = %approval.uuid,
        parties = approval.parties.len(),
        "approval records persisted"
    );
    Ok(())
}

#[derive(sqlx::FromRow)]
struct ApprovalRow {
    uuid: String,
    role: String,
    party_name: String,
    risk_change_status: String,
    change_reason: String,
    approved_at: DateTime<Utc>,
}

/// Load every approval for an operation, ordered by approval date
/// ascending.
pub async fn load_by_uuid(pool: &PgPool, uuid: &str) -> Result<Vec<ApprovalRecord>, sqlx::Error> {
    let rows: Vec<ApprovalRow> = sqlx::query_as(
        "SELECT uuid, role, party_name, risk_change_status, change_reason, approved_at
         FROM approval_records
         WHERE uuid = $1
         ORDER BY approved_at ASC",
    )
    .bind(uuid)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ApprovalRecord {
            uuid: row.uuid,
            role: row.role,
            name: row.party_name,
            override_level: row.risk_change_status,
            reason: row.change_reason,
            approved_at: row.approved_at,
        })
        .collect())
}
