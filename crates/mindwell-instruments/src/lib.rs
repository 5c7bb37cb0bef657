//! mindwell-instruments
//!
//! Screening instrument definitions, the scoring engine, and the
//! question-by-question session that drives a respondent through an
//! instrument. Pure data and computation: no I/O.

pub mod error;
pub mod instruments;
pub mod scoring;
pub mod session;

use error::InstrumentError;
use scoring::{DefinitionError, InstrumentDefinition, ResponseOption, Threshold};

/// Stem shown above every item of the two-week frequency questionnaires.
pub const TWO_WEEK_PREAMBLE: &str =
    "Over the last 2 weeks, how often have you been bothered by the following problem?";

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "phq9", "k10").
    fn id(&self) -> &str;

    /// Short display name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// Full title (e.g., "Patient Health Questionnaire-9").
    fn title(&self) -> &str;

    fn description(&self) -> &str;

    /// Rough completion time shown on the instrument card.
    fn time_estimate(&self) -> &str;

    fn preamble(&self) -> &str {
        TWO_WEEK_PREAMBLE
    }

    /// Item prompts in presentation order.
    fn questions(&self) -> &[&'static str];

    /// Allowed answers, ascending by value.
    fn response_scale(&self) -> &[ResponseOption];

    /// Tier cut-offs, ascending by bound, ending in an unbounded entry.
    fn thresholds(&self) -> &[Threshold];

    /// Zero-based item whose non-zero answer raises a risk alert.
    fn high_risk_item(&self) -> Option<usize> {
        None
    }

    fn question_count(&self) -> usize {
        self.questions().len()
    }

    /// Whether `value` is on this instrument's response scale.
    fn accepts(&self, value: u8) -> bool {
        self.response_scale().iter().any(|o| o.value == value)
    }

    /// Check the structural rules every definition must satisfy.
    fn validate_definition(&self) -> Vec<DefinitionError> {
        let mut problems = Vec::new();
        let mut problem = |message: String| {
            problems.push(DefinitionError {
                instrument_id: self.id().to_string(),
                message,
            })
        };

        if self.questions().is_empty() {
            problem("instrument has no questions".to_string());
        }

        let scale = self.response_scale();
        if scale.is_empty() {
            problem("response scale is empty".to_string());
        }
        if scale.windows(2).any(|w| w[0].value >= w[1].value) {
            problem("response scale values are not strictly ascending".to_string());
        }

        let thresholds = self.thresholds();
        match thresholds.split_last() {
            None => problem("no thresholds defined".to_string()),
            Some((last, rest)) => {
                if last.upper_bound.is_some() {
                    problem(format!("last threshold '{}' must be unbounded", last.tier));
                }
                if let Some(t) = rest.iter().find(|t| t.upper_bound.is_none()) {
                    problem(format!("threshold '{}' is unbounded but not last", t.tier));
                }
                let bounds: Vec<u32> = rest.iter().filter_map(|t| t.upper_bound).collect();
                if bounds.windows(2).any(|w| w[0] >= w[1]) {
                    problem("threshold bounds are not strictly ascending".to_string());
                }
            }
        }

        if let Some(index) = self.high_risk_item()
            && index >= self.questions().len()
        {
            problem(format!(
                "high-risk item {index} is out of range for {} questions",
                self.questions().len()
            ));
        }

        problems
    }

    fn definition(&self) -> InstrumentDefinition {
        InstrumentDefinition {
            id: self.id().to_string(),
            name: self.name().to_string(),
            title: self.title().to_string(),
            description: self.description().to_string(),
            time_estimate: self.time_estimate().to_string(),
            preamble: self.preamble().to_string(),
            questions: self.questions().iter().map(|q| q.to_string()).collect(),
            response_scale: self.response_scale().to_vec(),
            thresholds: self.thresholds().to_vec(),
            high_risk_item: self.high_risk_item(),
        }
    }
}

/// Return all registered instruments, in display order.
pub fn all_instruments() -> Vec<&'static dyn Instrument> {
    vec![
        &instruments::phq9::Phq9,
        &instruments::gad7::Gad7,
        &instruments::k10::K10,
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Result<&'static dyn Instrument, InstrumentError> {
    all_instruments()
        .into_iter()
        .find(|i| i.id() == id)
        .ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}
