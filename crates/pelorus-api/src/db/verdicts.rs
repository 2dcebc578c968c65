//! Verdict log persistence.
//!
//! Two tables of identical shape: `verdict_log` (one row per screening
//! call) and `verdict_change_log` (one row per reconciliation revision
//! that diverged). Projected columns serve queries; `full_response`
//! carries the complete verdict JSON for replay. Rows are append-only.

use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;

use pelorus_screening::OperationVerdict;

async fn append_to(
    pool: &PgPool,
    table: &str,
    verdict: &OperationVerdict,
) -> Result<(), sqlx::Error> {
    let full_response =
        serde_json::to_value(verdict).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    let now = Utc::now();

    let sql = format!(
        "INSERT INTO {table} (
             uuid, vertical, voyage_number, vessel_imo, vessel_name,
             project_risk_status, vessel_risk_status, stakeholder_risk_status,
             operator_id, operator_name, operator_department, operator_time,
             request_time, response_time, full_response
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)"
    );

    sqlx::query(&sql)
        .bind(&verdict.uuid)
        .bind(verdict.vertical.as_str())
        .bind(&verdict.voyage_number)
        .bind(&verdict.vessel_imo)
        .bind(&verdict.vessel_name)
        .bind(verdict.project_risk_status.as_str())
        .bind(verdict.vessel_risk_status.as_str())
        .bind(verdict.stakeholder_risk_status.as_str())
        .bind(&verdict.operator.operator_id)
        .bind(&verdict.operator.operator_name)
        .bind(&verdict.operator.operator_department)
        .bind(&verdict.operator.operator_time)
        .bind(verdict.screened_at)
        .bind(now)
        .bind(&full_response)
        .execute(pool)
        .await?;

    Ok(())
}

/// Append one row to the primary verdict log.
pub async fn append(pool: &PgPool, verdict: &OperationVerdict) -> Result<(), sqlx::Error> {
    append_to(pool, "verdict_log", verdict).await?;
    tracing::info!(uuid = %verdict.uuid, vertical = %verdict.vertical, "verdict persisted");
    Ok(())
}

/// Append one revision to the change log.
pub async fn append_change(pool: &PgPool, verdict: &OperationVerdict) -> Result<(), sqlx::Error> {
    append_to(pool, "verdict_change_log", verdict).await?;
    tracing::info!(uuid = %verdict.uuid, "verdict change revision persisted");
    Ok(())
}

async fn latest_from(
    pool: &PgPool,
    table: &str,
    uuid: &str,
) -> Result<Option<OperationVerdict>, sqlx::Error> {
    let sql = format!(
        "SELECT full_response FROM {table}
         WHERE uuid = $1
         ORDER BY request_time DESC
         LIMIT 1"
    );
    let row: Option<Value> = sqlx::query_scalar(&sql).bind(uuid).fetch_optional(pool).await?;

    match row {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| sqlx::Error::Decode(Box::new(e))),
        None => Ok(None),
    }
}

/// The latest verdict for an operation UUID, if any.
pub async fn latest_by_uuid(
    pool: &PgPool,
    uuid: &str,
) -> Result<Option<OperationVerdict>, sqlx::Error> {
    latest_from(pool, "verdict_log", uuid).await
}

/// The latest change-log revision for an operation UUID, if any.
pub async fn latest_change_by_uuid(
    pool: &PgPool,
    uuid: &str,
) -> Result<Option<OperationVerdict>, sqlx::Error> {
    latest_from(pool, "verdict_change_log", uuid).await
}
