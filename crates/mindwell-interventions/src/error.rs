use thiserror::Error;

use crate::clock::ClockState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("cannot {operation} while the clock is {state}")]
    TimerState {
        operation: &'static str,
        state: ClockState,
    },

    #[error("invalid phase schedule: {0}")]
    InvalidSchedule(String),
}
