//! # Risk Vocabulary
//!
//! The ordered risk vocabulary every check result and projected status is
//! expressed in. Two types:
//!
//! - [`RiskLevel`] — per-entity classification, total order
//!   `None < Medium < High`, wire form `无风险` / `中风险` / `高风险`.
//! - [`OperationStatus`] — operation-level projection, wire form
//!   `正常` / `关注` / `拦截`.
//!
//! Upstream providers speak several vocabularies ("High", "Sanctioned",
//! "Risks detected", localized strings, numeric codes from the approval
//! console). [`RiskLevel::parse`] folds all of them into the ordered set;
//! unknown values map to `None` so a provider adding a new label can never
//! escalate a verdict by accident.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-entity risk classification, totally ordered.
///
/// The derived `Ord` gives `None < Medium < High`, which is the order
/// every aggregation in the stack reduces over.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    /// No risk found. The default for empty inputs and unknown vocabulary.
    #[default]
    #[serde(rename = "无风险")]
    None,
    /// Medium risk.
    #[serde(rename = "中风险")]
    Medium,
    /// High risk.
    #[serde(rename = "高风险")]
    High,
}

impl RiskLevel {
    /// Map an upstream vocabulary value onto the ordered set.
    ///
    /// Matching is case-insensitive on the trimmed input. Values that map
    /// to nothing (including "Low", "No risk", and the empty string) are
    /// `None`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "高风险" | "高" | "high" | "high-risk" | "sanctioned" | "intercept" | "1" => {
                Self::High
            }
            "中风险" | "中" | "medium" | "risks detected" | "attention" | "2" => Self::Medium,
            _ => Self::None,
        }
    }

    /// The wire label (`无风险` / `中风险` / `高风险`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "无风险",
            Self::Medium => "中风险",
            Self::High => "高风险",
        }
    }

    /// Fold a sequence of levels to its maximum; empty input is `None`.
    pub fn max_of<I: IntoIterator<Item = RiskLevel>>(levels: I) -> Self {
        levels.into_iter().max().unwrap_or_default()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation-level risk disposition projected from per-check levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Proceed as normal.
    #[default]
    #[serde(rename = "正常")]
    Normal,
    /// Proceed under watch.
    #[serde(rename = "关注")]
    Watch,
    /// Intercept the operation.
    #[serde(rename = "拦截")]
    Intercept,
}

impl OperationStatus {
    /// The wire label (`正常` / `关注` / `拦截`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "正常",
            Self::Watch => "关注",
            Self::Intercept => "拦截",
        }
    }
}

impl From<RiskLevel> for OperationStatus {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::None => Self::Normal,
            RiskLevel::Medium => Self::Watch,
            RiskLevel::High => Self::Intercept,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_order_is_none_medium_high() {
        assert!(RiskLevel::None < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn parse_provider_vocabularies() {
        assert_eq!(RiskLevel::parse("High"), RiskLevel::High);
        assert_eq!(RiskLevel::parse("high-risk"), RiskLevel::High);
        assert_eq!(RiskLevel::parse("Sanctioned"), RiskLevel::High);
        assert_eq!(RiskLevel::parse("高风险"), RiskLevel::High);
        assert_eq!(RiskLevel::parse("Risks detected"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse("中风险"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse("No risk"), RiskLevel::None);
        assert_eq!(RiskLevel::parse("Low"), RiskLevel::None);
        assert_eq!(RiskLevel::parse("无风险"), RiskLevel::None);
    }

    #[test]
    fn parse_approval_console_codes() {
        assert_eq!(RiskLevel::parse("1"), RiskLevel::High);
        assert_eq!(RiskLevel::parse("2"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse("0"), RiskLevel::None);
        assert_eq!(RiskLevel::parse("intercept"), RiskLevel::High);
        assert_eq!(RiskLevel::parse("attention"), RiskLevel::Medium);
    }

    #[test]
    fn unknown_vocabulary_defaults_to_none() {
        assert_eq!(RiskLevel::parse(""), RiskLevel::None);
        assert_eq!(RiskLevel::parse("banana"), RiskLevel::None);
        assert_eq!(RiskLevel::parse("   "), RiskLevel::None);
    }

    #[test]
    fn max_of_empty_is_none() {
        assert_eq!(RiskLevel::max_of([]), RiskLevel::None);
    }

    #[test]
    fn max_of_picks_severest() {
        assert_eq!(
            RiskLevel::max_of([RiskLevel::None, RiskLevel::Medium, RiskLevel::None]),
            RiskLevel::Medium
        );
        assert_eq!(
            RiskLevel::max_of([RiskLevel::Medium, RiskLevel::High]),
            RiskLevel::High
        );
    }

    #[test]
    fn operation_status_projection() {
        assert_eq!(OperationStatus::from(RiskLevel::None), OperationStatus::Normal);
        assert_eq!(OperationStatus::from(RiskLevel::Medium), OperationStatus::Watch);
        assert_eq!(OperationStatus::from(RiskLevel::High), OperationStatus::Intercept);
    }

    #[test]
    fn wire_labels() {
        assert_eq!(RiskLevel::High.to_string(), "高风险");
        assert_eq!(OperationStatus::Intercept.to_string(), "拦截");
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).expect("serialize"),
            "\"中风险\""
        );
        assert_eq!(
            serde_json::to_string(&OperationStatus::Watch).expect("serialize"),
            "\"关注\""
        );
    }

    #[test]
    fn wire_labels_roundtrip() {
        let level: RiskLevel = serde_json::from_str("\"高风险\"").expect("deserialize");
        assert_eq!(level, RiskLevel::High);
        let status: OperationStatus = serde_json::from_str("\"正常\"").expect("deserialize");
        assert_eq!(status, OperationStatus::Normal);
    }
}
