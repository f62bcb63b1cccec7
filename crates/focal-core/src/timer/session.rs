//! Timer session state.
//!
//! A session is one countdown instance: a start timestamp and a target
//! duration. Remaining time is always recomputed from the wall clock, never
//! decremented by a counter, so a stalled or delayed tick cannot make the
//! clock drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coerce;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSession {
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    /// Target duration in seconds for the current countdown.
    #[serde(deserialize_with = "coerce::secs")]
    pub initial_secs: u64,
    pub is_active: bool,
    pub user_accepted_recommendation: bool,
}

impl TimerSession {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            session_id: None,
            started_at: None,
            initial_secs,
            is_active: false,
            user_accepted_recommendation: false,
        }
    }

    /// Stamp the session start. The countdown target is whatever
    /// `initial_secs` holds at that moment.
    pub fn start(&mut self, session_id: String, at: DateTime<Utc>) {
        self.session_id = Some(session_id);
        self.started_at = Some(at);
        self.is_active = true;
    }

    /// Clear the session. Recommendation acceptance state survives; a
    /// cancelled session must not re-arm the card.
    pub fn clear(&mut self) {
        self.session_id = None;
        self.started_at = None;
        self.is_active = false;
    }

    /// Whole seconds elapsed since the session started, never negative.
    pub fn elapsed_secs_at(&self, now: DateTime<Utc>) -> u64 {
        match self.started_at {
            Some(started) => (now - started).num_seconds().max(0) as u64,
            None => 0,
        }
    }

    /// Remaining seconds at `now`: `max(initial - elapsed, 0)` while active,
    /// `initial` otherwise.
    pub fn live_secs_at(&self, now: DateTime<Utc>) -> u64 {
        if self.is_active {
            self.initial_secs.saturating_sub(self.elapsed_secs_at(now))
        } else {
            self.initial_secs
        }
    }

    pub fn live_secs(&self) -> u64 {
        self.live_secs_at(Utc::now())
    }

    /// Progress through the countdown in `[0, 1]`. A zero-length countdown
    /// reports no progress.
    pub fn progress_at(&self, now: DateTime<Utc>) -> f64 {
        if self.initial_secs == 0 {
            return 0.0;
        }
        let remaining = self.live_secs_at(now) as f64;
        let fraction = (self.initial_secs as f64 - remaining) / self.initial_secs as f64;
        if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress_at(Utc::now())
    }

    /// Adjust the countdown target by `step_secs`, clamped at zero.
    ///
    /// Only valid while inactive; returns the new target, or `None` when
    /// the session is running and the adjustment was refused.
    pub fn adjust(&mut self, direction: AdjustDirection, step_secs: u64) -> Option<u64> {
        if self.is_active {
            return None;
        }
        self.initial_secs = match direction {
            AdjustDirection::Up => self.initial_secs.saturating_add(step_secs),
            AdjustDirection::Down => self.initial_secs.saturating_sub(step_secs),
        };
        Some(self.initial_secs)
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new(25 * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn active_session(initial_secs: u64, started: DateTime<Utc>) -> TimerSession {
        let mut session = TimerSession::new(initial_secs);
        session.start("s-1".into(), started);
        session
    }

    #[test]
    fn live_time_equals_initial_at_start() {
        let t0 = Utc::now();
        let session = active_session(1500, t0);
        assert_eq!(session.live_secs_at(t0), 1500);
    }

    #[test]
    fn live_time_counts_down_from_wall_clock() {
        let t0 = Utc::now();
        let session = active_session(1500, t0);
        assert_eq!(session.live_secs_at(t0 + Duration::seconds(65)), 1435);
    }

    #[test]
    fn live_time_never_negative() {
        let t0 = Utc::now();
        let session = active_session(60, t0);
        assert_eq!(session.live_secs_at(t0 + Duration::seconds(61)), 0);
        assert_eq!(session.live_secs_at(t0 + Duration::seconds(3600)), 0);
    }

    #[test]
    fn inactive_session_reports_initial_time() {
        let session = TimerSession::new(900);
        assert_eq!(session.live_secs(), 900);
    }

    #[test]
    fn clock_skew_before_start_reports_full_time() {
        let t0 = Utc::now();
        let session = active_session(1500, t0);
        assert_eq!(session.live_secs_at(t0 - Duration::seconds(10)), 1500);
    }

    #[test]
    fn progress_after_a_minute_of_a_pomodoro() {
        let t0 = Utc::now();
        let session = active_session(1500, t0);
        let progress = session.progress_at(t0 + Duration::seconds(65));
        assert!((progress - 65.0 / 1500.0).abs() < 1e-9);
    }

    #[test]
    fn progress_is_zero_for_zero_length_countdown() {
        let t0 = Utc::now();
        let session = active_session(0, t0);
        assert_eq!(session.progress_at(t0 + Duration::seconds(5)), 0.0);
    }

    #[test]
    fn progress_saturates_at_one() {
        let t0 = Utc::now();
        let session = active_session(10, t0);
        assert_eq!(session.progress_at(t0 + Duration::seconds(600)), 1.0);
    }

    #[test]
    fn adjust_refused_while_active() {
        let mut session = active_session(1500, Utc::now());
        assert_eq!(session.adjust(AdjustDirection::Up, 60), None);
        assert_eq!(session.initial_secs, 1500);
    }

    #[test]
    fn adjust_up_then_down_restores_initial() {
        let mut session = TimerSession::new(1500);
        session.adjust(AdjustDirection::Up, 60);
        session.adjust(AdjustDirection::Down, 60);
        assert_eq!(session.initial_secs, 1500);
    }

    #[test]
    fn adjust_down_clamps_at_zero() {
        let mut session = TimerSession::new(30);
        assert_eq!(session.adjust(AdjustDirection::Down, 60), Some(0));
    }

    #[test]
    fn clear_keeps_acceptance_state() {
        let mut session = active_session(1500, Utc::now());
        session.user_accepted_recommendation = true;
        session.clear();
        assert!(!session.is_active);
        assert!(session.session_id.is_none());
        assert!(session.user_accepted_recommendation);
    }
}
