//! Question-by-question screening session.
//!
//! A session moves freely back and forth between questions while in
//! progress. Advancing past the last question is one-way: it scores the
//! responses exactly once and freezes the session.

use std::fmt;

use mindwell_core::models::alert::{AlertSubscriber, RiskAlert};
use mindwell_core::models::score::ScoreResult;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::InstrumentError;
use crate::{get_instrument, scoring, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionState {
    InProgress,
    Complete,
}

/// Everything a question screen needs to render the session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub instrument_id: String,
    pub state: SessionState,
    pub current_index: usize,
    pub question_count: usize,
    pub question: String,
    pub answer: Option<u8>,
    pub progress: f64,
    pub result: Option<ScoreResult>,
}

pub struct ScreeningSession {
    id: Uuid,
    instrument: &'static dyn Instrument,
    responses: Vec<Option<u8>>,
    current_index: usize,
    result: Option<ScoreResult>,
    alert: Option<RiskAlert>,
}

impl ScreeningSession {
    /// Begin a session against a registered instrument.
    pub fn start(instrument_id: &str) -> Result<Self, InstrumentError> {
        Self::with_instrument(get_instrument(instrument_id)?)
    }

    /// Begin a session against any instrument definition. The definition is
    /// checked first so scoring can rely on exhaustive thresholds.
    pub fn with_instrument(instrument: &'static dyn Instrument) -> Result<Self, InstrumentError> {
        if let Some(problem) = instrument.validate_definition().into_iter().next() {
            return Err(problem.into());
        }

        let session = Self {
            id: Uuid::new_v4(),
            instrument,
            responses: vec![None; instrument.question_count()],
            current_index: 0,
            result: None,
            alert: None,
        };
        tracing::info!(
            session_id = %session.id,
            instrument = instrument.id(),
            questions = instrument.question_count(),
            "screening started"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn instrument(&self) -> &'static dyn Instrument {
        self.instrument
    }

    pub fn state(&self) -> SessionState {
        if self.result.is_some() {
            SessionState::Complete
        } else {
            SessionState::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn question_count(&self) -> usize {
        self.responses.len()
    }

    pub fn current_question(&self) -> &'static str {
        self.instrument.questions()[self.current_index]
    }

    pub fn current_answer(&self) -> Option<u8> {
        self.responses[self.current_index]
    }

    pub fn responses(&self) -> &[Option<u8>] {
        &self.responses
    }

    /// Record an answer for the current question. Does not advance.
    pub fn answer(&mut self, value: u8) -> Result<(), InstrumentError> {
        self.ensure_in_progress()?;
        if !self.instrument.accepts(value) {
            return Err(InstrumentError::InvalidResponse {
                instrument_id: self.instrument.id().to_string(),
                value,
                allowed: self.instrument.response_scale().iter().map(|o| o.value).collect(),
            });
        }

        self.responses[self.current_index] = Some(value);
        tracing::debug!(session_id = %self.id, index = self.current_index, value, "answer recorded");
        Ok(())
    }

    /// Move to the next question, or complete the session when on the last.
    pub fn next(&mut self) -> Result<(), InstrumentError> {
        self.ensure_in_progress()?;
        if self.current_answer().is_none() {
            return Err(InstrumentError::IncompleteAnswer {
                index: self.current_index,
            });
        }

        if self.current_index + 1 < self.question_count() {
            self.current_index += 1;
            tracing::debug!(session_id = %self.id, index = self.current_index, "advanced");
            return Ok(());
        }

        self.complete()
    }

    /// Move back one question, keeping every recorded answer.
    pub fn previous(&mut self) -> Result<(), InstrumentError> {
        self.ensure_in_progress()?;
        if self.current_index == 0 {
            return Err(InstrumentError::Boundary);
        }

        self.current_index -= 1;
        tracing::debug!(session_id = %self.id, index = self.current_index, "moved back");
        Ok(())
    }

    /// Position through the questionnaire, counting the current question.
    pub fn progress(&self) -> f64 {
        (self.current_index + 1) as f64 / self.question_count() as f64
    }

    pub fn result(&self) -> Result<&ScoreResult, InstrumentError> {
        self.result.as_ref().ok_or(InstrumentError::NotComplete)
    }

    /// The alert raised at completion, if the high-risk item was positive.
    pub fn risk_alert(&self) -> Option<&RiskAlert> {
        self.alert.as_ref()
    }

    /// Hand the risk alert, if any, to `subscriber`. Returns whether one was
    /// delivered.
    pub fn notify(&self, subscriber: &dyn AlertSubscriber) -> bool {
        match &self.alert {
            Some(alert) => {
                subscriber.on_risk_alert(alert);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            instrument_id: self.instrument.id().to_string(),
            state: self.state(),
            current_index: self.current_index,
            question_count: self.question_count(),
            question: self.current_question().to_string(),
            answer: self.current_answer(),
            progress: self.progress(),
            result: self.result.clone(),
        }
    }

    fn ensure_in_progress(&self) -> Result<(), InstrumentError> {
        match self.state() {
            SessionState::InProgress => Ok(()),
            SessionState::Complete => Err(InstrumentError::SessionComplete),
        }
    }

    fn complete(&mut self) -> Result<(), InstrumentError> {
        if let Some(index) = self.responses.iter().position(Option::is_none) {
            return Err(InstrumentError::IncompleteAnswer { index });
        }
        let responses: Vec<u8> = self.responses.iter().flatten().copied().collect();

        let result = scoring::evaluate(self.instrument, &responses);
        tracing::info!(
            session_id = %self.id,
            instrument = self.instrument.id(),
            total = result.total,
            tier = %result.tier,
            "screening complete"
        );

        if result.high_risk_alert {
            let alert = RiskAlert {
                session_id: self.id,
                instrument_id: result.instrument_id.clone(),
                tier: result.tier.clone(),
                raised_at: result.completed_at,
            };
            tracing::warn!(
                session_id = %self.id,
                instrument = %alert.instrument_id,
                tier = %alert.tier,
                "high-risk item answered above zero"
            );
            self.alert = Some(alert);
        }

        self.result = Some(result);
        Ok(())
    }
}

impl fmt::Debug for ScreeningSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreeningSession")
            .field("id", &self.id)
            .field("instrument", &self.instrument.id())
            .field("responses", &self.responses)
            .field("current_index", &self.current_index)
            .field("result", &self.result)
            .finish()
    }
}
