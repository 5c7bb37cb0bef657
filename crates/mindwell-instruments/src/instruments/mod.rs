pub mod gad7;
pub mod k10;
pub mod phq9;

use mindwell_core::models::score::Severity;

use crate::scoring::{ResponseOption, Threshold};

/// 0-3 frequency scale shared by PHQ-9 and GAD-7.
fn two_week_frequency_scale() -> Vec<ResponseOption> {
    [
        (0, "Not at all"),
        (1, "Several days"),
        (2, "More than half the days"),
        (3, "Nearly every day"),
    ]
    .into_iter()
    .map(|(value, label)| option(value, label))
    .collect()
}

fn option(value: u8, label: &str) -> ResponseOption {
    ResponseOption {
        value,
        label: label.to_string(),
    }
}

fn threshold(
    upper_bound: Option<u32>,
    tier: &str,
    description: &str,
    severity: Severity,
) -> Threshold {
    Threshold {
        upper_bound,
        tier: tier.to_string(),
        description: description.to_string(),
        severity,
    }
}
