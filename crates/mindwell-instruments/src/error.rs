use thiserror::Error;

use crate::scoring::DefinitionError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("{value} is not a valid response for '{instrument_id}' (allowed: {allowed:?})")]
    InvalidResponse {
        instrument_id: String,
        value: u8,
        allowed: Vec<u8>,
    },

    #[error("question {} has not been answered", .index + 1)]
    IncompleteAnswer { index: usize },

    #[error("already at the first question")]
    Boundary,

    #[error("screening is not complete")]
    NotComplete,

    #[error("screening is already complete")]
    SessionComplete,

    #[error("invalid instrument definition: {0}")]
    Definition(#[from] DefinitionError),
}
