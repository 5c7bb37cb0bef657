use mindwell_core::models::score::{ScoreResult, Severity};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::Instrument;

/// One selectable answer on an instrument's response scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseOption {
    /// Contributes to the total as-is, not by its position in the scale.
    pub value: u8,
    pub label: String,
}

/// A tier cut-off. Thresholds are scanned in ascending order and the first
/// one whose bound covers the total wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Threshold {
    /// Inclusive upper bound. `None` means unbounded and must be last.
    pub upper_bound: Option<u32>,
    pub tier: String,
    pub description: String,
    pub severity: Severity,
}

impl Threshold {
    pub fn covers(&self, total: u32) -> bool {
        self.upper_bound.is_none_or(|bound| total <= bound)
    }
}

/// Serializable view of an instrument for front ends.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstrumentDefinition {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub time_estimate: String,
    pub preamble: String,
    pub questions: Vec<String>,
    pub response_scale: Vec<ResponseOption>,
    pub thresholds: Vec<Threshold>,
    pub high_risk_item: Option<usize>,
}

/// A structural problem in an instrument definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{instrument_id}: {message}")]
pub struct DefinitionError {
    pub instrument_id: String,
    pub message: String,
}

/// Sum of all response values.
///
/// Callers pass a fully answered response set; a length mismatch is a bug in
/// the caller, not a recoverable condition.
pub fn score(instrument: &dyn Instrument, responses: &[u8]) -> u32 {
    debug_assert_eq!(
        responses.len(),
        instrument.question_count(),
        "{}: response count does not match question count",
        instrument.id()
    );
    responses.iter().map(|&v| u32::from(v)).sum()
}

/// Resolve the tier covering `total`.
///
/// # Panics
///
/// Panics if the instrument's thresholds are not exhaustive. Every
/// registered instrument is checked by [`Instrument::validate_definition`]
/// in the test suite, so a panic indicates a definition bug.
pub fn interpret(instrument: &dyn Instrument, total: u32) -> &Threshold {
    instrument
        .thresholds()
        .iter()
        .find(|t| t.covers(total))
        .unwrap_or_else(|| panic!("{}: no threshold covers total {total}", instrument.id()))
}

/// Whether the instrument's high-risk item was answered above zero.
///
/// Deliberately ignores the total and tier: a single positive answer on that
/// item raises the alert even when the overall score is minimal.
pub fn high_risk_alert(instrument: &dyn Instrument, responses: &[u8]) -> bool {
    instrument
        .high_risk_item()
        .and_then(|index| responses.get(index))
        .is_some_and(|&value| value > 0)
}

/// Score, classify and check the high-risk item in one pass.
pub fn evaluate(instrument: &dyn Instrument, responses: &[u8]) -> ScoreResult {
    let total = score(instrument, responses);
    let threshold = interpret(instrument, total);

    ScoreResult {
        instrument_id: instrument.id().to_string(),
        total,
        tier: threshold.tier.clone(),
        description: threshold.description.clone(),
        severity: threshold.severity,
        high_risk_alert: high_risk_alert(instrument, responses),
        completed_at: jiff::Timestamp::now(),
    }
}
