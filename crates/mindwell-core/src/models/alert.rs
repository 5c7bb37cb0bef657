use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Raised when a completed screening carries a positive high-risk item.
///
/// The core only builds this value. Delivering it (to a counselor
/// dashboard, a pager, a log) is the job of whatever [`AlertSubscriber`]
/// the presentation layer wires up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAlert {
    pub session_id: Uuid,
    pub instrument_id: String,
    pub tier: String,
    pub raised_at: jiff::Timestamp,
}

/// Receiver for risk alerts.
pub trait AlertSubscriber {
    fn on_risk_alert(&self, alert: &RiskAlert);
}

impl<F> AlertSubscriber for F
where
    F: Fn(&RiskAlert),
{
    fn on_risk_alert(&self, alert: &RiskAlert) {
        self(alert)
    }
}
