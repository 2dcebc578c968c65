//! Validation errors for core domain primitives.

/// Errors raised when constructing validated domain primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// IMO number is not exactly seven ASCII digits.
    #[error("invalid IMO number {0:?}: expected exactly 7 digits")]
    InvalidImo(String),

    /// A date window where the start is after the end.
    #[error("invalid date window: start {start} is after end {end}")]
    InvalidWindow {
        /// Window start (ISO date).
        start: String,
        /// Window end (ISO date).
        end: String,
    },

    /// A date string that does not parse as ISO `YYYY-MM-DD`.
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
}
