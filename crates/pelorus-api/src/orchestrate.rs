//! # Screening Orchestration (I/O half)
//!
//! Gathers everything a screening session needs — provider prefetch,
//! watchlist and sanctions lookups, the previous verdict, risk notes,
//! country hits, fleet data — then hands the bundle to the pure session
//! core and persists the assembled verdict.
//!
//! Independent fetches run concurrently: the provider prefetch and every
//! database lookup are joined in one round, and per-name sanctions
//! lookups fan out on a `JoinSet`. Cancellation is structural — if the
//! client disconnects, axum drops the handler future, which aborts the
//! in-flight provider calls and lookups before anything is written. The
//! verdict row is inserted only after all checks completed, so partial
//! persistence cannot happen.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tokio::task::JoinSet;

use pelorus_core::{normalized_name, DateWindow, Imo};
use pelorus_intel::{prefetch_vessel_intel, SessionCache, Slot, VesselIntel};
use pelorus_screening::lookup::{SanctionsRow, WatchlistHit};
use pelorus_screening::reconcile::{self, ApprovalRecord};
use pelorus_screening::session::{
    run_screening, FleetInputs, FleetVesselRef, ScreeningInputs, ScreeningRequest,
};
use pelorus_screening::OperationVerdict;

use crate::db;
use crate::error::AppError;
use crate::state::AppState;

/// Run one full screening: fetch, evaluate, persist, return.
pub async fn screen(
    state: &AppState,
    request: ScreeningRequest,
) -> Result<OperationVerdict, AppError> {
    let cache = Arc::new(SessionCache::new());
    let window = DateWindow::last_year();

    let intel_fut = async {
        match &request.vessel_imo {
            Some(imo) => {
                prefetch_vessel_intel(&state.lloyds, &state.kpler, &cache, imo, window).await
            }
            None => VesselIntel::empty(window),
        }
    };
    let watchlist_fut = async {
        match &request.vessel_imo {
            Some(imo) => db::watchlist::lookup(&state.pool, imo).await,
            None => WatchlistHit::miss(),
        }
    };
    let previous_fut = async {
        match db::verdicts::latest_by_uuid(&state.pool, &request.uuid).await {
            Ok(previous) => previous,
            Err(e) => {
                tracing::warn!(uuid = %request.uuid, "previous verdict unavailable: {e}");
                None
            }
        }
    };
    let cargo_fut = async {
        match &request.cargo_origin {
            Some(country) => db::countries::is_high_risk(&state.pool, country).await,
            None => false,
        }
    };
    let port_fut = async {
        match &request.port_country {
            Some(country) => db::countries::is_high_risk(&state.pool, country).await,
            None => false,
        }
    };

    let names: Vec<String> = request
        .roles
        .iter()
        .flat_map(|(_, names)| names.iter())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    let (intel, watchlist, previous, notes, cargo_hit, port_hit, sanctions_rows, fleet) = tokio::join!(
        intel_fut,
        watchlist_fut,
        previous_fut,
        db::notes::load_all(&state.pool),
        cargo_fut,
        port_fut,
        lookup_sanctions_rows(&state.pool, names),
        gather_fleet(state, cache.clone(), window, &request.fleet),
    );

    let inputs = ScreeningInputs {
        intel,
        watchlist,
        sanctions_rows,
        cargo_origin_high_risk: cargo_hit,
        port_high_risk: port_hit,
        previous,
        notes,
        fleet,
    };

    let verdict = run_screening(&request, &inputs, Utc::now());

    db::verdicts::append(&state.pool, &verdict)
        .await
        .map_err(AppError::Persist)?;

    Ok(verdict)
}

/// Screen each unique counterparty name against the sanctions store,
/// concurrently. Keys are normalized names; misses are absent.
async fn lookup_sanctions_rows(
    pool: &PgPool,
    names: Vec<String>,
) -> BTreeMap<String, SanctionsRow> {
    let mut unique: Vec<String> = Vec::new();
    let mut seen = std::collections::BTreeSet::new();
    for name in names {
        if seen.insert(normalized_name(&name)) {
            unique.push(name);
        }
    }

    let mut set = JoinSet::new();
    for name in unique {
        let pool = pool.clone();
        set.spawn(async move {
            let row = db::sanctions::lookup(&pool, &name).await;
            (normalized_name(&name), row)
        });
    }

    let mut rows = BTreeMap::new();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((key, Some(row))) => {
                rows.insert(key, row);
            }
            Ok((_, None)) => {}
            Err(e) => tracing::warn!("sanctions lookup task failed: {e}"),
        }
    }
    rows
}

/// Gather per-fleet-vessel inputs: one bulk Intelligence-B call for the
/// whole fleet, plus per-vessel sanctions and watchlist lookups.
async fn gather_fleet(
    state: &AppState,
    cache: Arc<SessionCache>,
    window: DateWindow,
    fleet: &[FleetVesselRef],
) -> Vec<FleetInputs> {
    if fleet.is_empty() {
        return Vec::new();
    }

    let imos: Vec<Imo> = fleet.iter().filter_map(|v| v.imo.clone()).collect();
    let bulk_risks = if imos.is_empty() {
        Slot::Ready(Vec::new())
    } else {
        match state.kpler.vessel_risks(&cache, &imos, &window).await {
            Ok(records) => Slot::Ready(records),
            Err(e) => {
                tracing::warn!("fleet bulk risk call failed: {e}");
                Slot::Failed(e.to_string())
            }
        }
    };

    let mut set = JoinSet::new();
    for (index, vessel) in fleet.iter().cloned().enumerate() {
        let lloyds = state.lloyds.clone();
        let pool = state.pool.clone();
        let cache = cache.clone();
        let bulk = bulk_risks.clone();
        set.spawn(async move {
            let mut intel = VesselIntel::empty(window);
            intel.imo = vessel.imo.clone();
            intel.vessel_risks = bulk;

            let watchlist = match &vessel.imo {
                Some(imo) => {
                    intel.sanctions = match lloyds.sanctions(&cache, imo).await {
                        Ok(records) => Slot::Ready(records),
                        Err(e) => Slot::Failed(e.to_string()),
                    };
                    db::watchlist::lookup(&pool, imo).await
                }
                None => WatchlistHit::miss(),
            };

            (index, FleetInputs { vessel, intel, watchlist })
        });
    }

    let mut gathered: Vec<(usize, FleetInputs)> = Vec::with_capacity(fleet.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(entry) => gathered.push(entry),
            Err(e) => tracing::warn!("fleet screening task failed: {e}"),
        }
    }
    // Verdict arrays follow the request's fleet order.
    gathered.sort_by_key(|(index, _)| *index);
    gathered.into_iter().map(|(_, inputs)| inputs).collect()
}

/// Outcome of one approval reconciliation request.
pub struct ReconciliationResult {
    /// The reconciled verdict.
    pub verdict: OperationVerdict,
    /// Whether a new change-log revision was appended.
    pub revision_appended: bool,
}

/// Store the approval act, then replay all approvals for the UUID onto
/// the latest verdict. Appends a change-log revision only when the
/// reconciled projection diverges from the latest revision. Issues no
/// upstream calls.
pub async fn reconcile_approvals(
    state: &AppState,
    approval: db::approvals::NewApproval,
) -> Result<ReconciliationResult, AppError> {
    let uuid = approval.uuid.clone();

    let latest = db::verdicts::latest_by_uuid(&state.pool, &uuid)
        .await
        .map_err(|e| AppError::Internal(format!("verdict load failed: {e}")))?
        .ok_or_else(|| AppError::NotFound(format!("no verdict recorded for uuid {uuid}")))?;

    db::approvals::append(&state.pool, &approval)
        .await
        .map_err(AppError::Persist)?;

    let approvals: Vec<ApprovalRecord> = db::approvals::load_by_uuid(&state.pool, &uuid)
        .await
        .map_err(|e| AppError::Internal(format!("approval load failed: {e}")))?;

    let latest_change = match db::verdicts::latest_change_by_uuid(&state.pool, &uuid).await {
        Ok(change) => change,
        Err(e) => {
            tracing::warn!(uuid = %uuid, "change log unavailable, treating as empty: {e}");
            None
        }
    };

    let outcome = reconcile::reconcile(latest, &approvals, latest_change.as_ref());
    tracing::info!(
        uuid = %uuid,
        applied = outcome.applied,
        skipped = outcome.skipped,
        diverged = outcome.diverged,
        "approval reconciliation complete"
    );

    if outcome.diverged {
        db::verdicts::append_change(&state.pool, &outcome.verdict)
            .await
            .map_err(AppError::Persist)?;
    }

    Ok(ReconciliationResult {
        verdict: outcome.verdict,
        revision_appended: outcome.diverged,
    })
}
