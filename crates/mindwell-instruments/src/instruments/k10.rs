use std::sync::LazyLock;

use mindwell_core::models::score::Severity;

use super::{option, threshold};
use crate::scoring::{ResponseOption, Threshold};
use crate::Instrument;

/// K-10: Kessler Psychological Distress Scale.
/// Ten items rated 1-5, so the minimum total is 10, not 0.
pub struct K10;

const QUESTIONS: [&str; 10] = [
    "About how often did you feel tired out for no good reason?",
    "About how often did you feel nervous?",
    "About how often did you feel so nervous that nothing could calm you down?",
    "About how often did you feel hopeless?",
    "About how often did you feel restless or fidgety?",
    "About how often did you feel so restless you could not sit still?",
    "About how often did you feel depressed?",
    "About how often did you feel that everything was an effort?",
    "About how often did you feel so sad that nothing could cheer you up?",
    "About how often did you feel worthless?",
];

impl Instrument for K10 {
    fn id(&self) -> &str {
        "k10"
    }

    fn name(&self) -> &str {
        "K-10"
    }

    fn title(&self) -> &str {
        "Kessler Psychological Distress Scale"
    }

    fn description(&self) -> &str {
        "Assesses general psychological distress"
    }

    fn time_estimate(&self) -> &str {
        "3-4 minutes"
    }

    fn questions(&self) -> &[&'static str] {
        &QUESTIONS
    }

    fn response_scale(&self) -> &[ResponseOption] {
        static SCALE: LazyLock<Vec<ResponseOption>> = LazyLock::new(|| {
            vec![
                option(1, "None of the time"),
                option(2, "A little of the time"),
                option(3, "Some of the time"),
                option(4, "Most of the time"),
                option(5, "All of the time"),
            ]
        });
        &SCALE
    }

    fn thresholds(&self) -> &[Threshold] {
        static THRESHOLDS: LazyLock<Vec<Threshold>> = LazyLock::new(|| {
            vec![
                threshold(Some(15), "Low", "Likely to be well", Severity::Low),
                threshold(Some(21), "Moderate", "Likely to have mild distress", Severity::Elevated),
                threshold(Some(29), "High", "Likely to have moderate distress", Severity::Elevated),
                threshold(None, "Very High", "Likely to have severe distress", Severity::Severe),
            ]
        });
        &THRESHOLDS
    }
}
