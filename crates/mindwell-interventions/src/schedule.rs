use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ClockError;

/// One named sub-interval of a repeating cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Phase {
    pub name: String,
    /// Cue shown to the user while the phase runs (e.g., "Breathe In").
    pub instruction: String,
    pub seconds: u32,
}

impl Phase {
    pub fn new(name: &str, instruction: &str, seconds: u32) -> Self {
        Self {
            name: name.to_string(),
            instruction: instruction.to_string(),
            seconds,
        }
    }
}

/// Where a point in time falls within the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePosition<'a> {
    pub index: usize,
    pub phase: &'a Phase,
    /// Seconds already spent in this phase.
    pub offset: u32,
}

impl PhasePosition<'_> {
    pub fn remaining(&self) -> u32 {
        self.phase.seconds - self.offset
    }
}

/// Ordered, non-empty list of phases with positive durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Phase>", into = "Vec<Phase>")]
pub struct PhaseSchedule {
    phases: Vec<Phase>,
}

impl PhaseSchedule {
    pub fn new(phases: Vec<Phase>) -> Result<Self, ClockError> {
        if phases.is_empty() {
            return Err(ClockError::InvalidSchedule("schedule has no phases".to_string()));
        }
        if let Some(phase) = phases.iter().find(|p| p.seconds == 0) {
            return Err(ClockError::InvalidSchedule(format!(
                "phase '{}' has zero duration",
                phase.name
            )));
        }
        if phases
            .iter()
            .try_fold(0u32, |total, p| total.checked_add(p.seconds))
            .is_none()
        {
            return Err(ClockError::InvalidSchedule(
                "total cycle length overflows".to_string(),
            ));
        }
        Ok(Self { phases })
    }

    /// Box breathing: inhale, hold, exhale, pause, four seconds each.
    pub fn box_breathing() -> Self {
        Self {
            phases: vec![
                Phase::new("inhale", "Breathe In", 4),
                Phase::new("hold", "Hold", 4),
                Phase::new("exhale", "Breathe Out", 4),
                Phase::new("pause", "Pause", 4),
            ],
        }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn cycle_length(&self) -> u32 {
        self.phases.iter().map(|p| p.seconds).sum()
    }

    /// Locate `elapsed` seconds within the repeating cycle.
    pub fn position(&self, elapsed: u32) -> PhasePosition<'_> {
        let mut offset = elapsed % self.cycle_length();
        for (index, phase) in self.phases.iter().enumerate() {
            if offset < phase.seconds {
                return PhasePosition {
                    index,
                    phase,
                    offset,
                };
            }
            offset -= phase.seconds;
        }
        unreachable!("offset within cycle always falls inside a phase")
    }
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self::box_breathing()
    }
}

impl TryFrom<Vec<Phase>> for PhaseSchedule {
    type Error = ClockError;

    fn try_from(phases: Vec<Phase>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}

impl From<PhaseSchedule> for Vec<Phase> {
    fn from(schedule: PhaseSchedule) -> Self {
        schedule.phases
    }
}
