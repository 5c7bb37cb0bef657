use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ClockError;
use crate::schedule::{Phase, PhaseSchedule};

/// Default session goal for box breathing: five minutes.
pub const DEFAULT_TARGET_SECONDS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ClockState {
    Idle,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClockState::Idle => "idle",
            ClockState::Running => "running",
            ClockState::Paused => "paused",
            ClockState::Finished => "finished",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClockConfig")]
pub struct ClockConfig {
    pub schedule: PhaseSchedule,
    pub target_seconds: u32,
    /// Reject misuse (pausing an idle clock, starting a finished one)
    /// instead of ignoring it.
    #[serde(default)]
    pub strict: bool,
}

impl ClockConfig {
    pub fn new(schedule: PhaseSchedule, target_seconds: u32) -> Result<Self, ClockError> {
        if target_seconds == 0 {
            return Err(ClockError::InvalidSchedule(
                "target duration must be at least one second".to_string(),
            ));
        }
        Ok(Self {
            schedule,
            target_seconds,
            strict: false,
        })
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[derive(Deserialize)]
struct RawClockConfig {
    schedule: PhaseSchedule,
    target_seconds: u32,
    #[serde(default)]
    strict: bool,
}

impl TryFrom<RawClockConfig> for ClockConfig {
    type Error = ClockError;

    fn try_from(raw: RawClockConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.schedule, raw.target_seconds)?.strict(raw.strict))
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            schedule: PhaseSchedule::box_breathing(),
            target_seconds: DEFAULT_TARGET_SECONDS,
            strict: false,
        }
    }
}

/// What changed on a tick, so a UI can cue transitions without diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TickOutcome {
    pub elapsed_seconds: u32,
    pub phase_changed: bool,
    pub cycle_completed: bool,
    pub finished: bool,
}

/// Phase-cycling timer for a guided exercise.
///
/// Completion is a pure elapsed-time threshold: the clock finishes the tick
/// `elapsed_seconds` reaches the target, even in the middle of a phase.
#[derive(Debug, Clone)]
pub struct InterventionClock {
    config: ClockConfig,
    state: ClockState,
    elapsed_seconds: u32,
}

impl InterventionClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            state: ClockState::Idle,
            elapsed_seconds: 0,
        }
    }

    pub fn box_breathing() -> Self {
        Self::new(ClockConfig::default())
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == ClockState::Finished
    }

    /// Idle or Paused to Running. Resuming keeps the elapsed time.
    pub fn start(&mut self) -> Result<(), ClockError> {
        match self.state {
            ClockState::Idle | ClockState::Paused => {
                self.transition(ClockState::Running);
                Ok(())
            }
            ClockState::Running => Ok(()),
            ClockState::Finished => self.misuse("start"),
        }
    }

    pub fn pause(&mut self) -> Result<(), ClockError> {
        match self.state {
            ClockState::Running => {
                self.transition(ClockState::Paused);
                Ok(())
            }
            _ => self.misuse("pause"),
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
        self.transition(ClockState::Idle);
    }

    /// Advance by one second. Only valid while running.
    pub fn tick(&mut self) -> Result<TickOutcome, ClockError> {
        if self.state != ClockState::Running {
            return Err(ClockError::TimerState {
                operation: "tick",
                state: self.state,
            });
        }

        let phase_before = self.position_index();
        let cycles_before = self.cycle_count();
        self.elapsed_seconds += 1;

        let cycle_completed = self.cycle_count() > cycles_before;
        let mut outcome = TickOutcome {
            elapsed_seconds: self.elapsed_seconds,
            // A one-phase schedule re-enters the same index on each cycle.
            phase_changed: cycle_completed || self.position_index() != phase_before,
            cycle_completed,
            finished: false,
        };
        tracing::trace!(
            elapsed = self.elapsed_seconds,
            phase = %self.current_phase().name,
            "tick"
        );

        if self.elapsed_seconds >= self.config.target_seconds {
            self.transition(ClockState::Finished);
            outcome.finished = true;
        }
        Ok(outcome)
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Full cycles completed so far.
    pub fn cycle_count(&self) -> u32 {
        self.elapsed_seconds / self.config.schedule.cycle_length()
    }

    pub fn current_phase(&self) -> &Phase {
        self.config.schedule.position(self.elapsed_seconds).phase
    }

    pub fn seconds_remaining_in_phase(&self) -> u32 {
        self.config.schedule.position(self.elapsed_seconds).remaining()
    }

    /// Fraction of the current phase already spent, in [0, 1).
    pub fn phase_progress(&self) -> f64 {
        let position = self.config.schedule.position(self.elapsed_seconds);
        f64::from(position.offset) / f64::from(position.phase.seconds)
    }

    /// Fraction of the target duration elapsed, capped at 1.
    pub fn progress_fraction(&self) -> f64 {
        (f64::from(self.elapsed_seconds) / f64::from(self.config.target_seconds)).min(1.0)
    }

    /// Elapsed time as `m:ss`.
    pub fn elapsed_display(&self) -> String {
        format!("{}:{:02}", self.elapsed_seconds / 60, self.elapsed_seconds % 60)
    }

    fn position_index(&self) -> usize {
        self.config.schedule.position(self.elapsed_seconds).index
    }

    fn misuse(&self, operation: &'static str) -> Result<(), ClockError> {
        if self.config.strict {
            return Err(ClockError::TimerState {
                operation,
                state: self.state,
            });
        }
        tracing::debug!(operation, state = %self.state, "ignored clock request");
        Ok(())
    }

    fn transition(&mut self, to: ClockState) {
        if self.state != to {
            tracing::info!(
                from = %self.state,
                to = %to,
                elapsed = self.elapsed_seconds,
                "clock state changed"
            );
        }
        self.state = to;
    }
}
