//! # HTTP Routes
//!
//! One screening route per vertical, the approval-reconciliation route,
//! and the health probe. Request DTOs mirror the established inbound
//! JSON contracts per vertical; responses are the assembled
//! [`pelorus_screening::OperationVerdict`].

pub mod approval;
pub mod health;
pub mod purchase;
pub mod second_hand;
pub mod sts;
pub mod warehousing;

use axum::Router;
use serde::Deserialize;

use pelorus_core::Imo;

use crate::error::AppError;
use crate::state::AppState;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(sts::router())
        .merge(purchase::router())
        .merge(second_hand::router())
        .merge(warehousing::router())
        .merge(approval::router())
}

/// A role field that callers send either as one name or a name list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NameInput {
    /// A single name.
    One(String),
    /// A list of names.
    Many(Vec<String>),
}

impl NameInput {
    /// Flatten into a trimmed name list, dropping empties.
    pub fn into_names(self) -> Vec<String> {
        let raw = match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        };
        raw.into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

impl Default for NameInput {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Validate the operation UUID and return it in canonical form.
pub(crate) fn parse_uuid(raw: &str) -> Result<String, AppError> {
    uuid::Uuid::parse_str(raw.trim())
        .map(|parsed| parsed.to_string())
        .map_err(|_| AppError::Validation(format!("uuid {raw:?} is not a valid UUID")))
}

/// Trim and validate an optional IMO field.
///
/// `required` verticals reject absence; others screen vessel checks with
/// empty inputs when no IMO is supplied.
pub(crate) fn parse_imo(raw: Option<&str>, required: bool) -> Result<Option<Imo>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => Ok(Some(Imo::new(text)?)),
        None if required => Err(AppError::Validation("vessel_imo is required".into())),
        None => Ok(None),
    }
}

/// A supplied fleet vessel reference on purchase/disposal requests.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetEntryDto {
    /// Fleet vessel name.
    #[serde(default)]
    pub vessel_name: String,
    /// Fleet vessel IMO.
    #[serde(default)]
    pub vessel_imo: String,
}

impl FleetEntryDto {
    /// Convert to the screening core's fleet reference; malformed IMOs
    /// screen as vessels without identity rather than failing the call.
    pub fn into_ref(self) -> pelorus_screening::session::FleetVesselRef {
        let imo = Imo::new(self.vessel_imo.as_str()).ok();
        if imo.is_none() && !self.vessel_imo.trim().is_empty() {
            tracing::warn!(supplied = %self.vessel_imo, "ignoring malformed fleet IMO");
        }
        pelorus_screening::session::FleetVesselRef {
            name: self.vessel_name.trim().to_string(),
            imo,
        }
    }
}
