use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recommend::Recommendation;
use crate::store::UiFlags;
use crate::timer::{AdjustDirection, Phase};

/// Every state change in the store produces an Event.
/// Front-ends poll for snapshots and render the rest as they arrive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_id: String,
        phase: Phase,
        initial_secs: u64,
        at: DateTime<Utc>,
    },
    SessionCancelled {
        session_id: String,
        phase: Phase,
        initial_secs: u64,
        started_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero; the cycle has already advanced to `next_phase`.
    SessionCompleted {
        session_id: String,
        phase: Phase,
        initial_secs: u64,
        started_at: DateTime<Utc>,
        next_phase: Phase,
        next_secs: u64,
        at: DateTime<Utc>,
    },
    /// User skipped the rest of the phase; the cycle decided what comes next.
    PhaseSkipped {
        session_id: String,
        from: Phase,
        to: Phase,
        initial_secs: u64,
        started_at: DateTime<Utc>,
        next_secs: u64,
        at: DateTime<Utc>,
    },
    TimeAdjusted {
        direction: AdjustDirection,
        initial_secs: u64,
        at: DateTime<Utc>,
    },
    /// Both context inputs are now set and the card became visible.
    RecommendationShown {
        recommendation: Recommendation,
        at: DateTime<Utc>,
    },
    RecommendationAccepted {
        focus_secs: u64,
        break_secs: u64,
        at: DateTime<Utc>,
    },
    RecommendationRejected {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        is_active: bool,
        initial_secs: u64,
        live_secs: u64,
        clock: String,
        progress: f64,
        flags: UiFlags,
        recommendation: Option<Recommendation>,
        at: DateTime<Utc>,
    },
}
