use std::sync::LazyLock;

use mindwell_core::models::score::Severity;

use super::{threshold, two_week_frequency_scale};
use crate::scoring::{ResponseOption, Threshold};
use crate::Instrument;

/// GAD-7: Generalized Anxiety Disorder-7. Seven items rated 0-3, total 0-21.
pub struct Gad7;

const QUESTIONS: [&str; 7] = [
    "Feeling nervous, anxious, or on edge?",
    "Not being able to stop or control worrying?",
    "Worrying too much about different things?",
    "Trouble relaxing?",
    "Being so restless that it is hard to sit still?",
    "Becoming easily annoyed or irritable?",
    "Feeling afraid, as if something awful might happen?",
];

impl Instrument for Gad7 {
    fn id(&self) -> &str {
        "gad7"
    }

    fn name(&self) -> &str {
        "GAD-7"
    }

    fn title(&self) -> &str {
        "Generalized Anxiety Disorder-7"
    }

    fn description(&self) -> &str {
        "Measures anxiety symptoms over the past 2 weeks"
    }

    fn time_estimate(&self) -> &str {
        "2 minutes"
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
                threshold(Some(4), "Minimal", "Minimal anxiety symptoms", Severity::Low),
                threshold(Some(9), "Mild", "Mild anxiety symptoms", Severity::Elevated),
                threshold(Some(14), "Moderate", "Moderate anxiety symptoms", Severity::Elevated),
                threshold(None, "Severe", "Severe anxiety symptoms", Severity::Severe),
            ]
        });
        &THRESHOLDS
    }
}
