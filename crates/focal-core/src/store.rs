//! The focus store.
//!
//! `FocusStore` is the explicit context object front-ends drive: it owns the
//! timer session, the phase cycle, the recommendation gate, and the UI
//! visibility flags, and it is the only writer of any of them. Commands
//! return `Option<Event>` -- `None` means the intent was not valid in the
//! current state and nothing changed.
//!
//! The store has no internal threads and never sleeps; callers poll `tick()`
//! (the 1-second loop lives in the front-end) and read snapshots on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::Event;
use crate::recommend::{EnergyLevel, Recommendation, RecommendationGate, TaskType, TimeOfDay};
use crate::storage::Config;
use crate::timer::{AdjustDirection, Phase, PhaseCycle, TimerSession};

/// Visibility flags derived from store state. Owned by the store, read-only
/// to front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiFlags {
    pub show_time_adjust: bool,
    pub show_cancel: bool,
    pub show_skip: bool,
    pub has_dismissed_recommendation_card: bool,
    pub has_interacted_with_timer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusStore {
    session: TimerSession,
    cycle: PhaseCycle,
    gate: RecommendationGate,
    adjust_step_secs: u64,
    recommendations_enabled: bool,
    has_interacted_with_timer: bool,
    has_dismissed_recommendation_card: bool,
}

impl Default for FocusStore {
    fn default() -> Self {
        let cycle = PhaseCycle::default();
        let session = TimerSession::new(cycle.current_duration());
        Self {
            session,
            cycle,
            gate: RecommendationGate::default(),
            adjust_step_secs: 60,
            recommendations_enabled: true,
            has_interacted_with_timer: false,
            has_dismissed_recommendation_card: false,
        }
    }
}

impl FocusStore {
    pub fn from_config(config: &Config) -> Self {
        let cycle = PhaseCycle::new(config.timer.focus_secs, config.timer.break_secs);
        let session = TimerSession::new(cycle.current_duration());
        Self {
            session,
            cycle,
            gate: RecommendationGate::default(),
            adjust_step_secs: config.timer.adjust_step_secs,
            recommendations_enabled: config.recommendations.enabled,
            has_interacted_with_timer: false,
            has_dismissed_recommendation_card: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn cycle(&self) -> &PhaseCycle {
        &self.cycle
    }

    pub fn phase(&self) -> Phase {
        self.cycle.current
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active
    }

    pub fn initial_secs(&self) -> u64 {
        self.session.initial_secs
    }

    pub fn live_secs(&self) -> u64 {
        self.session.live_secs()
    }

    pub fn live_secs_at(&self, now: DateTime<Utc>) -> u64 {
        self.session.live_secs_at(now)
    }

    pub fn has_interacted_with_timer(&self) -> bool {
        self.has_interacted_with_timer
    }

    pub fn has_dismissed_recommendation_card(&self) -> bool {
        self.has_dismissed_recommendation_card
    }

    /// The visible recommendation card, if any, for the current wall-clock
    /// time of day.
    pub fn recommendation_card(&self) -> Option<Recommendation> {
        self.recommendation_card_at(TimeOfDay::now())
    }

    pub fn recommendation_card_at(&self, time_of_day: TimeOfDay) -> Option<Recommendation> {
        if !self.recommendations_enabled {
            return None;
        }
        self.gate.card_at(
            time_of_day,
            self.session.user_accepted_recommendation,
            self.has_dismissed_recommendation_card,
        )
    }

    pub fn flags(&self) -> UiFlags {
        let active = self.session.is_active;
        UiFlags {
            // Manual adjustment is hidden while running and while the
            // recommendation card is on screen.
            show_time_adjust: !active && self.recommendation_card().is_none(),
            show_cancel: active,
            show_skip: active,
            has_dismissed_recommendation_card: self.has_dismissed_recommendation_card,
            has_interacted_with_timer: self.has_interacted_with_timer,
        }
    }

    pub fn snapshot(&self) -> Event {
        self.snapshot_at(Utc::now(), TimeOfDay::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>, time_of_day: TimeOfDay) -> Event {
        let live_secs = self.session.live_secs_at(now);
        Event::StateSnapshot {
            phase: self.cycle.current,
            is_active: self.session.is_active,
            initial_secs: self.session.initial_secs,
            live_secs,
            clock: crate::display::format_clock(live_secs),
            progress: self.session.progress_at(now),
            flags: self.flags(),
            recommendation: self.recommendation_card_at(time_of_day),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start_timer(&mut self) -> Option<Event> {
        if self.session.is_active {
            return None;
        }
        let at = Utc::now();
        let session_id = Uuid::new_v4().to_string();
        self.session.start(session_id.clone(), at);
        log::debug!("session {session_id} started ({} secs)", self.session.initial_secs);
        Some(Event::SessionStarted {
            session_id,
            phase: self.cycle.current,
            initial_secs: self.session.initial_secs,
            at,
        })
    }

    /// Clear the session. No side effects on recommendation state.
    pub fn cancel_timer(&mut self) -> Option<Event> {
        if !self.session.is_active {
            return None;
        }
        let at = Utc::now();
        let session_id = self.session.session_id.take().unwrap_or_default();
        let started_at = self.session.started_at.unwrap_or(at);
        let initial_secs = self.session.initial_secs;
        let phase = self.cycle.current;
        self.session.clear();
        Some(Event::SessionCancelled {
            session_id,
            phase,
            initial_secs,
            started_at,
            at,
        })
    }

    /// End the current phase early and let the cycle pick the next one.
    pub fn skip_timer(&mut self) -> Option<Event> {
        if !self.session.is_active {
            return None;
        }
        let at = Utc::now();
        let session_id = self.session.session_id.take().unwrap_or_default();
        let started_at = self.session.started_at.unwrap_or(at);
        let initial_secs = self.session.initial_secs;
        let from = self.cycle.current;
        self.session.clear();
        let to = self.cycle.advance();
        self.session.initial_secs = self.cycle.current_duration();
        Some(Event::PhaseSkipped {
            session_id,
            from,
            to,
            initial_secs,
            started_at,
            next_secs: self.session.initial_secs,
            at,
        })
    }

    /// Poll for completion. Returns `Some(Event::SessionCompleted)` once the
    /// countdown reaches zero; the cycle advances and the next phase's
    /// duration is loaded.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(Utc::now())
    }

    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if !self.session.is_active || self.session.live_secs_at(now) > 0 {
            return None;
        }
        let session_id = self.session.session_id.take().unwrap_or_default();
        let started_at = self.session.started_at.unwrap_or(now);
        let initial_secs = self.session.initial_secs;
        let phase = self.cycle.current;
        self.session.clear();
        let next_phase = self.cycle.advance();
        self.session.initial_secs = self.cycle.current_duration();
        log::debug!("session {session_id} completed, next phase {}", next_phase.name());
        Some(Event::SessionCompleted {
            session_id,
            phase,
            initial_secs,
            started_at,
            next_phase,
            next_secs: self.session.initial_secs,
            at: now,
        })
    }

    /// Nudge the countdown target by the configured step. Inactive only.
    pub fn adjust_time(&mut self, direction: AdjustDirection) -> Option<Event> {
        let initial_secs = self.session.adjust(direction, self.adjust_step_secs)?;
        Some(Event::TimeAdjusted {
            direction,
            initial_secs,
            at: Utc::now(),
        })
    }

    pub fn set_energy(&mut self, energy: EnergyLevel) -> Option<Event> {
        let was_visible = self.recommendation_card().is_some();
        self.gate.set_energy(energy);
        self.card_shown_event(was_visible)
    }

    pub fn set_task_type(&mut self, task_type: TaskType) -> Option<Event> {
        let was_visible = self.recommendation_card().is_some();
        self.gate.set_task_type(task_type);
        self.card_shown_event(was_visible)
    }

    fn card_shown_event(&self, was_visible: bool) -> Option<Event> {
        if was_visible {
            return None;
        }
        self.recommendation_card().map(|recommendation| Event::RecommendationShown {
            recommendation,
            at: Utc::now(),
        })
    }

    /// Commit the suggested durations into the session and cycle.
    pub fn accept_recommendation(&mut self) -> Option<Event> {
        if self.session.is_active {
            return None;
        }
        let card = self.recommendation_card()?;
        self.cycle.set_durations(card.focus_secs, card.break_secs);
        self.session.initial_secs = self.cycle.current_duration();
        self.session.user_accepted_recommendation = true;
        Some(Event::RecommendationAccepted {
            focus_secs: card.focus_secs,
            break_secs: card.break_secs,
            at: Utc::now(),
        })
    }

    /// Dismiss the card, leaving current durations untouched. Manual
    /// time-adjust controls become visible afterwards.
    pub fn reject_recommendation(&mut self) -> Option<Event> {
        self.recommendation_card()?;
        self.has_dismissed_recommendation_card = true;
        Some(Event::RecommendationRejected { at: Utc::now() })
    }

    // ── Direct state patches for transient UI flags ──────────────────

    pub fn set_has_interacted_with_timer(&mut self, value: bool) {
        self.has_interacted_with_timer = value;
    }

    pub fn set_has_dismissed_recommendation_card(&mut self, value: bool) {
        self.has_dismissed_recommendation_card = value;
    }
}
