use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How alarming a tier is. Drives the colour of the result badge and
/// whether the respondent is prompted to contact a counselor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Low,
    Elevated,
    Severe,
}

/// Outcome of a completed screening. Computed once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub instrument_id: String,
    pub total: u32,
    pub tier: String,
    pub description: String,
    pub severity: Severity,
    /// Set from a single item's response, never from `total` or `tier`.
    pub high_risk_alert: bool,
    pub completed_at: jiff::Timestamp,
}

impl ScoreResult {
    /// Whether the result screen should offer immediate counselor contact.
    pub fn counselor_prompt(&self) -> bool {
        self.severity == Severity::Severe || self.high_risk_alert
    }
}
