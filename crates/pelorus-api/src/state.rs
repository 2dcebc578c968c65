//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use pelorus_intel::{KplerClient, LloydsClient};

use crate::config::Config;
use crate::error::AppError;

/// State shared across request handlers.
///
/// The provider clients are process-wide (connection pooling lives inside
/// `reqwest`); the per-screening session cache is created per request by
/// the orchestrator, so no screening state leaks between sessions.
#[derive(Clone)]
pub struct AppState {
    /// Postgres pool for the verdict store and local lookups.
    pub pool: PgPool,
    /// Intelligence-A client.
    pub lloyds: Arc<LloydsClient>,
    /// Intelligence-B client.
    pub kpler: Arc<KplerClient>,
}

impl AppState {
    /// Build the state from validated configuration and a connected pool.
    pub fn new(config: &Config, pool: PgPool) -> Result<Self, AppError> {
        let lloyds = LloydsClient::new(config.lloyds.clone())
            .map_err(|e| AppError::Internal(format!("lloyds client: {e}")))?;
        let kpler = KplerClient::new(config.kpler.clone())
            .map_err(|e| AppError::Internal(format!("kpler client: {e}")))?;
        Ok(Self {
            pool,
            lloyds: Arc::new(lloyds),
            kpler: Arc::new(kpler),
        })
    }
}
