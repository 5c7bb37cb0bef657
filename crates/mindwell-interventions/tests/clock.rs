//! Intervention clock driven by synthetic ticks.

use mindwell_interventions::clock::{ClockConfig, ClockState, InterventionClock, TickOutcome};
use mindwell_interventions::error::ClockError;
use mindwell_interventions::schedule::{Phase, PhaseSchedule};
use proptest::prelude::*;

fn running_clock() -> InterventionClock {
    let mut clock = InterventionClock::box_breathing();
    clock.start().unwrap();
    clock
}

fn tick_n(clock: &mut InterventionClock, n: u32) {
    for _ in 0..n {
        clock.tick().unwrap();
    }
}

#[test]
fn starts_idle_at_first_phase() {
    let clock = InterventionClock::box_breathing();
    assert_eq!(clock.state(), ClockState::Idle);
    assert_eq!(clock.elapsed_seconds(), 0);
    assert_eq!(clock.cycle_count(), 0);
    assert_eq!(clock.current_phase().name, "inhale");
    assert_eq!(clock.current_phase().instruction, "Breathe In");
    assert_eq!(clock.seconds_remaining_in_phase(), 4);
    assert_eq!(clock.progress_fraction(), 0.0);
}

#[test]
fn default_session_finishes_after_300_ticks_with_18_cycles() {
    let mut clock = running_clock();
    tick_n(&mut clock, 299);
    assert_eq!(clock.state(), ClockState::Running);

    let outcome = clock.tick().unwrap();
    assert!(outcome.finished);
    assert_eq!(clock.state(), ClockState::Finished);
    assert_eq!(clock.elapsed_seconds(), 300);
    assert_eq!(clock.cycle_count(), 18);
    assert_eq!(clock.progress_fraction(), 1.0);
    assert_eq!(clock.elapsed_display(), "5:00");
}

#[test]
fn finishing_can_land_mid_cycle() {
    let mut clock = running_clock();
    tick_n(&mut clock, 300);

    // 300 = 18 * 16 + 12: the last cycle stops at the start of "pause".
    assert_eq!(clock.current_phase().name, "pause");
    assert_eq!(clock.seconds_remaining_in_phase(), 4);
}

#[test]
fn ticking_outside_running_fails() {
    let mut clock = InterventionClock::box_breathing();
    assert_eq!(
        clock.tick().unwrap_err(),
        ClockError::TimerState {
            operation: "tick",
            state: ClockState::Idle
        }
    );

    clock.start().unwrap();
    clock.tick().unwrap();
    clock.pause().unwrap();
    assert!(matches!(
        clock.tick(),
        Err(ClockError::TimerState {
            state: ClockState::Paused,
            ..
        })
    ));
    assert_eq!(clock.elapsed_seconds(), 1);

    let mut done = InterventionClock::new(
        ClockConfig::new(PhaseSchedule::box_breathing(), 2).unwrap(),
    );
    done.start().unwrap();
    tick_n(&mut done, 2);
    assert!(matches!(
        done.tick(),
        Err(ClockError::TimerState {
            state: ClockState::Finished,
            ..
        })
    ));
    assert_eq!(done.elapsed_seconds(), 2);
}

#[test]
fn resume_keeps_elapsed_time() {
    let mut clock = running_clock();
    tick_n(&mut clock, 5);
    clock.pause().unwrap();
    assert_eq!(clock.state(), ClockState::Paused);

    clock.start().unwrap();
    assert_eq!(clock.state(), ClockState::Running);
    assert_eq!(clock.elapsed_seconds(), 5);
    assert_eq!(clock.current_phase().name, "hold");
    assert_eq!(clock.seconds_remaining_in_phase(), 3);
}

#[test]
fn reset_returns_to_idle_from_any_state() {
    let mut clock = running_clock();
    tick_n(&mut clock, 40);
    assert_eq!(clock.cycle_count(), 2);

    clock.reset();
    assert_eq!(clock.state(), ClockState::Idle);
    assert_eq!(clock.elapsed_seconds(), 0);
    assert_eq!(clock.cycle_count(), 0);

    clock.start().unwrap();
    tick_n(&mut clock, 300);
    assert!(clock.is_finished());
    clock.reset();
    assert_eq!(clock.state(), ClockState::Idle);
    assert_eq!(clock.progress_fraction(), 0.0);
}

#[test]
fn lenient_clock_ignores_misuse() {
    let mut clock = InterventionClock::box_breathing();
    clock.pause().unwrap();
    assert_eq!(clock.state(), ClockState::Idle);

    clock.start().unwrap();
    clock.start().unwrap();
    assert_eq!(clock.state(), ClockState::Running);

    tick_n(&mut clock, 300);
    assert_eq!(clock.state(), ClockState::Finished);
    clock.start().unwrap();
    assert_eq!(clock.state(), ClockState::Finished);
    assert_eq!(clock.elapsed_seconds(), 300);
}

#[test]
fn strict_clock_rejects_misuse() {
    let config = ClockConfig::new(PhaseSchedule::box_breathing(), 3)
        .unwrap()
        .strict(true);
    let mut clock = InterventionClock::new(config);

    assert_eq!(
        clock.pause().unwrap_err(),
        ClockError::TimerState {
            operation: "pause",
            state: ClockState::Idle
        }
    );

    clock.start().unwrap();
    tick_n(&mut clock, 3);
    assert_eq!(
        clock.start().unwrap_err(),
        ClockError::TimerState {
            operation: "start",
            state: ClockState::Finished
        }
    );
}

#[test]
fn tick_outcome_marks_phase_and_cycle_edges() {
    let mut clock = running_clock();
    let outcomes: Vec<TickOutcome> = (0..16).map(|_| clock.tick().unwrap()).collect();

    let phase_changes: Vec<u32> = outcomes
        .iter()
        .filter(|o| o.phase_changed)
        .map(|o| o.elapsed_seconds)
        .collect();
    assert_eq!(phase_changes, vec![4, 8, 12, 16]);

    let cycles: Vec<u32> = outcomes
        .iter()
        .filter(|o| o.cycle_completed)
        .map(|o| o.elapsed_seconds)
        .collect();
    assert_eq!(cycles, vec![16]);
}

#[test]
fn phase_progress_and_display() {
    let mut clock = running_clock();
    tick_n(&mut clock, 2);
    assert!((clock.phase_progress() - 0.5).abs() < 1e-9);

    tick_n(&mut clock, 73);
    assert_eq!(clock.elapsed_display(), "1:15");
    assert!((clock.progress_fraction() - 0.25).abs() < 1e-9);
}

#[test]
fn zero_target_is_rejected() {
    assert!(matches!(
        ClockConfig::new(PhaseSchedule::box_breathing(), 0),
        Err(ClockError::InvalidSchedule(_))
    ));
}

#[test]
fn config_deserialization_validates_schedule() {
    let json = r#"{"schedule": [], "target_seconds": 60}"#;
    assert!(serde_json::from_str::<ClockConfig>(json).is_err());

    let json = r#"{"schedule": [{"name": "in", "instruction": "Breathe In", "seconds": 5}], "target_seconds": 60}"#;
    let config: ClockConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.schedule.phases(), &[Phase::new("in", "Breathe In", 5)]);
    assert!(!config.strict);

    let json = r#"{"schedule": [{"name": "in", "instruction": "Breathe In", "seconds": 4}], "target_seconds": 0}"#;
    let err = serde_json::from_str::<ClockConfig>(json).unwrap_err();
    assert!(err.to_string().contains("target duration must be at least one second"));

    let json = r#"{"schedule": [{"name": "in", "instruction": "Breathe In", "seconds": 4}], "target_seconds": 8, "strict": true}"#;
    let config: ClockConfig = serde_json::from_str(json).unwrap();
    assert!(config.strict);
    assert_eq!(InterventionClock::new(config).progress_fraction(), 0.0);
}

fn schedule_strategy() -> impl Strategy<Value = PhaseSchedule> {
    proptest::collection::vec(1u32..10, 1..6).prop_map(|seconds| {
        let phases = seconds
            .into_iter()
            .enumerate()
            .map(|(i, s)| Phase::new(&format!("p{i}"), "", s))
            .collect();
        PhaseSchedule::new(phases).unwrap()
    })
}

proptest! {
    #[test]
    fn phase_and_cycle_follow_elapsed_time(
        schedule in schedule_strategy(),
        target in 1u32..200,
    ) {
        let cycle = schedule.cycle_length();
        let mut clock = InterventionClock::new(ClockConfig::new(schedule, target).unwrap());
        clock.start().unwrap();

        while !clock.is_finished() {
            let before = clock.elapsed_seconds();
            clock.tick().unwrap();
            let elapsed = clock.elapsed_seconds();
            prop_assert_eq!(elapsed, before + 1);
            prop_assert_eq!(clock.cycle_count(), elapsed / cycle);

            let position = clock.config().schedule.position(elapsed);
            let start: u32 = clock.config().schedule.phases()[..position.index]
                .iter()
                .map(|p| p.seconds)
                .sum();
            let offset = elapsed % cycle;
            prop_assert!(start <= offset && offset < start + position.phase.seconds);
            prop_assert!(clock.progress_fraction() <= 1.0);
        }

        prop_assert_eq!(clock.elapsed_seconds(), target);
    }
}
