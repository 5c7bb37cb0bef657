use std::sync::LazyLock;

use mindwell_core::models::score::Severity;

use super::{threshold, two_week_frequency_scale};
use crate::scoring::{ResponseOption, Threshold};
use crate::Instrument;

/// PHQ-9: Patient Health Questionnaire-9.
/// Nine items rated 0-3, total 0-27. Item 9 asks about thoughts of
/// self-harm and raises a risk alert on any non-zero answer.
pub struct Phq9;

const QUESTIONS: [&str; 9] = [
    "Little interest or pleasure in doing things?",
    "Feeling down, depressed, or hopeless?",
    "Trouble falling or staying asleep, or sleeping too much?",
    "Feeling tired or having little energy?",
    "Poor appetite or overeating?",
    "Feeling bad about yourself or that you are a failure or have let yourself or your family down?",
    "Trouble concentrating on things, such as reading the newspaper or watching television?",
    "Moving or speaking so slowly that other people could have noticed? Or the opposite - being so fidgety or restless that you have been moving around a lot more than usual?",
    "Thoughts that you would be better off dead, or of hurting yourself in some way?",
];

/// Zero-based index of the self-harm item.
pub const SELF_HARM_ITEM: usize = 8;

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn title(&self) -> &str {
        "Patient Health Questionnaire-9"
    }

    fn description(&self) -> &str {
        "Screens for depression severity over the past 2 weeks"
    }

    fn time_estimate(&self) -> &str {
        "2-3 minutes"
    }

    fn questions(&self) -> &[&'static str] {
        &QUESTIONS
    }

    fn response_scale(&self) -> &[ResponseOption] {
        static SCALE: LazyLock<Vec<ResponseOption>> = LazyLock::new(two_week_frequency_scale);
        &SCALE
    }

    fn thresholds(&self) -> &[Threshold] {
        static THRESHOLDS: LazyLock<Vec<Threshold>> = LazyLock::new(|| {
            vec![
                threshold(Some(4), "Minimal", "Minimal depression symptoms", Severity::Low),
                threshold(Some(9), "Mild", "Mild depression symptoms", Severity::Elevated),
                threshold(
                    Some(14),
                    "Moderate",
                    "Moderate depression symptoms",
                    Severity::Elevated,
                ),
                threshold(
                    Some(19),
                    "Moderately Severe",
                    "Moderately severe depression",
                    Severity::Severe,
                ),
                threshold(None, "Severe", "Severe depression symptoms", Severity::Severe),
            ]
        });
        &THRESHOLDS
    }

    fn high_risk_item(&self) -> Option<usize> {
        Some(SELF_HARM_ITEM)
    }
}
