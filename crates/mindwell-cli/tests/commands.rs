//! Commands driven with in-memory input and output.

use std::cell::RefCell;
use std::io::Cursor;
use std::time::Duration;

use mindwell_cli::commands::{
    list_instruments, list_interventions, print_grounding, run_breathing, run_screening,
};
use mindwell_core::models::alert::RiskAlert;
use mindwell_core::models::score::ScoreResult;
use mindwell_interventions::catalog::Category;
use mindwell_interventions::clock::{ClockConfig, ClockState, InterventionClock};
use mindwell_interventions::schedule::PhaseSchedule;

fn screen(instrument: &str, input: &str) -> (Option<ScoreResult>, String, Vec<RiskAlert>) {
    let alerts = RefCell::new(Vec::new());
    let subscriber = |alert: &RiskAlert| alerts.borrow_mut().push(alert.clone());
    let mut out = Vec::new();

    let result = run_screening(instrument, Cursor::new(input), &mut out, &subscriber).unwrap();
    (result, String::from_utf8(out).unwrap(), alerts.into_inner())
}

#[test]
fn gad7_screening_completes() {
    let (result, out, alerts) = screen("gad7", "1\n1\n1\n1\n1\n1\n0\n");
    let result = result.expect("completed");

    assert_eq!(result.total, 6);
    assert_eq!(result.tier, "Mild");
    assert!(alerts.is_empty());
    assert!(out.contains("Question 1 of 7"));
    assert!(out.contains("Score: 6 (Mild)"));
    assert!(!out.contains("Immediate support"));
}

#[test]
fn invalid_answer_is_reported_and_question_repeats() {
    let (result, out, _) = screen("phq9", "7\n0\n0\n0\n0\n0\n0\n0\n0\n0\n");

    assert_eq!(result.unwrap().total, 0);
    assert!(out.contains("7 is not a valid response for 'phq9'"));
}

#[test]
fn back_and_empty_next_are_handled() {
    // Answer 3, go back, re-answer 0, then finish.
    let (result, out, _) = screen("gad7", "3\nb\n0\n\n0\n0\n0\n0\n0\n0\n");

    assert!(out.contains("question 2 has not been answered"));
    assert_eq!(result.unwrap().total, 0);
}

#[test]
fn back_on_first_question_is_reported() {
    let (result, out, _) = screen("gad7", "b\nq\n");
    assert!(result.is_none());
    assert!(out.contains("already at the first question"));
    assert!(out.contains("Screening cancelled."));
}

#[test]
fn end_of_input_abandons_the_screening() {
    let (result, _, alerts) = screen("k10", "1\n1\n");
    assert!(result.is_none());
    assert!(alerts.is_empty());
}

#[test]
fn self_harm_item_notifies_subscriber_and_prompts_counselor() {
    let (result, out, alerts) = screen("phq9", "0\n0\n0\n0\n0\n0\n0\n0\n1\n");
    let result = result.unwrap();

    assert_eq!(result.tier, "Minimal");
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].instrument_id, "phq9");
    assert!(out.contains("Immediate support available"));
}

#[test]
fn unknown_instrument_is_an_error() {
    let mut out = Vec::new();
    let quiet = |_: &RiskAlert| {};
    let err = run_screening("bdi", Cursor::new(""), &mut out, &quiet).unwrap_err();
    assert!(err.to_string().contains("unknown instrument: bdi"));
}

#[test]
fn instrument_listing() {
    let mut out = Vec::new();
    list_instruments(&mut out, false).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("phq9"));
    assert!(text.contains("Kessler Psychological Distress Scale"));

    let mut out = Vec::new();
    list_instruments(&mut out, true).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0]["high_risk_item"], 8);
}

#[test]
fn intervention_listing_filters_by_category() {
    let mut out = Vec::new();
    list_interventions(&mut out, Some(Category::Mood)).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Quick Thought Record"));
    assert!(!text.contains("Box Breathing"));
}

#[test]
fn grounding_lists_five_senses() {
    let mut out = Vec::new();
    print_grounding(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    for sense in ["See", "Touch", "Hear", "Smell", "Taste"] {
        assert!(text.contains(sense), "{sense}");
    }
}

#[tokio::test(start_paused = true)]
async fn breathing_runs_to_completion() {
    let config = ClockConfig::new(PhaseSchedule::box_breathing(), 20).unwrap();
    let mut clock = InterventionClock::new(config);
    let mut out = Vec::new();

    run_breathing(&mut clock, &mut out, Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(clock.state(), ClockState::Finished);
    assert_eq!(clock.elapsed_seconds(), 20);
    assert_eq!(clock.cycle_count(), 1);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("[0:00] Breathe In (4s)"));
    assert!(text.contains("[0:04] Hold (4s)"));
    assert!(text.contains("[0:16] Breathe In (4s)"));
    assert!(text.contains("completed 0:20 of breathing over 1 cycles"));
}
