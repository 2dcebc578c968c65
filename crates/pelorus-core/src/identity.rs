//! # Subject Identifiers
//!
//! Validated newtypes for screening subjects. An [`Imo`] cannot be
//! constructed from anything but seven ASCII digits, and deserialization
//! routes through the same constructor so malformed identifiers are
//! rejected at the wire boundary rather than deep inside a check.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A 7-digit IMO vessel identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Imo(String);

impl Imo {
    /// Validate and construct an IMO number.
    ///
    /// Surrounding whitespace is trimmed; the remainder must be exactly
    /// seven ASCII digits.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.len() == 7 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidImo(raw))
        }
    }

    /// The IMO as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The IMO as an integer, for providers that take numeric IMO lists.
    pub fn as_u32(&self) -> u32 {
        // Valid by construction: seven digits always fit in u32.
        self.0.parse().unwrap_or(0)
    }
}

impl std::fmt::Display for Imo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Imo {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Imo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
