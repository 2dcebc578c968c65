//! # Pelorus Core
//!
//! Foundational types shared by every crate in the Pelorus maritime
//! screening stack. Nothing in here performs I/O: this crate defines the
//! risk vocabulary and its total order, validated subject identifiers,
//! the canonical name normalization used for all entity comparisons, and
//! the screening date window.

pub mod error;
pub mod identity;
pub mod normalize;
pub mod risk;
pub mod temporal;

pub use error::ValidationError;
pub use identity::Imo;
pub use normalize::normalized_name;
pub use risk::{OperationStatus, RiskLevel};
pub use temporal::DateWindow;
