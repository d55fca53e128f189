//! Conflict snapshot model.
//!
//! A snapshot is a JSON array of conflict records delivered by the analytics
//! collaborator once per view-load or refresh. The engine treats decoded
//! snapshots as immutable; a refresh fully replaces the previous dataset.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Identifier of a conflict group, unique within one snapshot.
pub type ConflictId = i64;

/// Ordered severity tiers, most severe first. Severity informs color only;
/// it has no layout behavior.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    /// Lowest tier. Unknown severity strings decode to this instead of failing.
    #[default]
    #[serde(other)]
    Low,
}

impl Severity {
    /// All tiers, most severe first. Legend rendering iterates this so tier
    /// order never depends on dataset order.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// One competing-query group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub id: ConflictId,
    /// The contested search term. Display only.
    pub query: String,
    #[serde(default)]
    pub severity: Severity,
    /// Non-negative scalar; larger means more ranking instability.
    #[serde(default)]
    pub volatility: f64,
    /// Ordered; index 0 is the primary candidate and keeps the first palette
    /// slot across every cluster.
    pub pages: Vec<Page>,
}

/// One page competing inside a conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Average rank position; lower is better.
    pub position: f64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub impressions: u64,
    /// Click-through rate, percent.
    #[serde(default)]
    pub ctr: f64,
    /// This page's percentage of the conflict's total clicks. Values within
    /// one conflict sum to ~100, but nothing downstream may rely on that.
    #[serde(default, rename = "clickShare")]
    pub click_share: f64,
    /// Historical `position` samples, most recent last. May be empty, and may
    /// differ in length from sibling pages.
    #[serde(default)]
    pub trend: Vec<f64>,
}

/// Decodes and validates one snapshot.
///
/// A conflict with zero pages violates the snapshot contract and is rejected
/// here so layout code can rely on `pages` being non-empty. Invalid
/// volatility values are clamped to zero rather than rejected.
pub fn decode_snapshot(value: &serde_json::Value) -> Result<Vec<Conflict>> {
    let mut conflicts: Vec<Conflict> = serde_json::from_value(value.clone())?;
    for conflict in &mut conflicts {
        if conflict.pages.is_empty() {
            return Err(Error::InvalidSnapshot {
                message: format!(
                    "conflict {} ({:?}) has no pages",
                    conflict.id, conflict.query
                ),
            });
        }
        if !conflict.volatility.is_finite() || conflict.volatility < 0.0 {
            tracing::warn!(
                conflict = conflict.id,
                volatility = conflict.volatility,
                "clamping invalid volatility to 0"
            );
            conflict.volatility = 0.0;
        }
    }
    tracing::debug!(conflicts = conflicts.len(), "decoded conflict snapshot");
    Ok(conflicts)
}

pub fn decode_snapshot_str(text: &str) -> Result<Vec<Conflict>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    decode_snapshot(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_snapshot_fills_defaults() {
        let value = json!([
            {
                "id": 7,
                "query": "standing desk",
                "pages": [
                    { "url": "https://example.com/a", "position": 3.2 }
                ]
            }
        ]);
        let conflicts = decode_snapshot(&value).unwrap();
        assert_eq!(conflicts.len(), 1);
        let c = &conflicts[0];
        assert_eq!(c.severity, Severity::Low);
        assert_eq!(c.volatility, 0.0);
        assert_eq!(c.pages[0].clicks, 0);
        assert_eq!(c.pages[0].click_share, 0.0);
        assert!(c.pages[0].trend.is_empty());
    }

    #[test]
    fn decode_snapshot_rejects_conflict_without_pages() {
        let value = json!([
            { "id": 3, "query": "empty", "pages": [] }
        ]);
        let err = decode_snapshot(&value).unwrap_err().to_string();
        assert_eq!(err, "invalid snapshot: conflict 3 (\"empty\") has no pages");
    }

    #[test]
    fn decode_snapshot_clamps_negative_volatility() {
        let value = json!([
            {
                "id": 1,
                "query": "q",
                "volatility": -2.5,
                "pages": [{ "url": "u", "position": 1.0 }]
            }
        ]);
        let conflicts = decode_snapshot(&value).unwrap();
        assert_eq!(conflicts[0].volatility, 0.0);
    }

    #[test]
    fn unknown_severity_decodes_to_lowest_tier() {
        let value = json!([
            {
                "id": 1,
                "query": "q",
                "severity": "catastrophic",
                "pages": [{ "url": "u", "position": 1.0 }]
            }
        ]);
        let conflicts = decode_snapshot(&value).unwrap();
        assert_eq!(conflicts[0].severity, Severity::Low);
    }

    #[test]
    fn severity_tiers_are_ordered_most_severe_first() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::High < Severity::Medium);
        assert!(Severity::Medium < Severity::Low);
    }
}
