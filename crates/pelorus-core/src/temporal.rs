//! # Screening Date Windows
//!
//! The date window a screening looks back over. Defaults to the last 365
//! days. Intelligence-A endpoints take the window as a single hyphenated
//! `YYYY-MM-DD-YYYY-MM-DD` parameter; Intelligence-B takes the two ISO
//! dates separately.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An inclusive screening window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Window start.
    pub start: NaiveDate,
    /// Window end.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Construct a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse a window from two ISO `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(start.to_string()))?;
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(end.to_string()))?;
        Self::new(start, end)
    }

    /// The default window: today minus 365 days through today.
    pub fn last_year() -> Self {
        let end = Utc::now().date_naive();
        Self {
            start: end - Duration::days(365),
            end,
        }
    }

    /// The window ending on `end`, starting 365 days earlier.
    pub fn year_ending(end: NaiveDate) -> Self {
        Self {
            start: end - Duration::days(365),
            end,
        }
    }

    /// Intelligence-A composite range parameter: `YYYY-MM-DD-YYYY-MM-DD`.
    pub fn as_range_param(&self) -> String {
        format!("{}-{}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }

    /// Window start as ISO `YYYY-MM-DD`.
    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Window end as ISO `YYYY-MM-DD`.
    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
