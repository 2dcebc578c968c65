//! # Pelorus Screening
//!
//! The risk check orchestration core. Everything in this crate is pure
//! over already-fetched data: the I/O layer (HTTP providers, database
//! lookups) assembles a [`session::ScreeningInputs`] bundle, and this
//! crate turns it into an [`verdict::OperationVerdict`].
//!
//! ## Layout
//!
//! - [`registry`] — the declarative catalog of checks: which checks each
//!   vertical runs, what they need, what they may emit, and the fixed
//!   classification string tables.
//! - [`evaluators`] — one pure classification function per atomic check.
//! - [`composite`] — max-severity reduction of child checks with merged,
//!   source-tagged evidence.
//! - [`verdict`] — the assembled verdict records as they go to the wire
//!   and the verdict store.
//! - [`aggregate`] — projected statuses (operation, vessel, stakeholder,
//!   per-domain).
//! - [`session`] — drives one screening: evaluate, diff against the
//!   previous verdict, assemble.
//! - [`reconcile`] — replay operator approvals onto the latest verdict.

pub mod aggregate;
pub mod composite;
pub mod evaluators;
pub mod lookup;
pub mod registry;
pub mod result;
pub mod session;
pub mod verdict;
pub mod reconcile;

pub use registry::{CheckCategory, CheckDescriptor, CheckId, CheckKind, Vertical};
pub use result::CheckResult;
pub use verdict::{OperationVerdict, StakeholderVerdict, VesselRiskItem};
