use serde::{Deserialize, Serialize};

use crate::coerce;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::Break => "break",
        }
    }

    pub fn other(&self) -> Phase {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }
}

/// Alternating focus/break cycle.
///
/// The cycle is the collaborator that decides what comes after a skipped or
/// completed phase. It owns the durations for both phases; an accepted
/// recommendation overwrites them, manual adjustment only touches the
/// session's own countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCycle {
    pub current: Phase,
    #[serde(deserialize_with = "coerce::secs")]
    pub focus_secs: u64,
    #[serde(deserialize_with = "coerce::secs")]
    pub break_secs: u64,
}

impl PhaseCycle {
    pub fn new(focus_secs: u64, break_secs: u64) -> Self {
        Self {
            current: Phase::Focus,
            focus_secs,
            break_secs,
        }
    }

    pub fn duration_of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Focus => self.focus_secs,
            Phase::Break => self.break_secs,
        }
    }

    pub fn current_duration(&self) -> u64 {
        self.duration_of(self.current)
    }

    /// Move to the next phase and return it.
    pub fn advance(&mut self) -> Phase {
        self.current = self.current.other();
        self.current
    }

    pub fn set_durations(&mut self, focus_secs: u64, break_secs: u64) {
        self.focus_secs = focus_secs;
        self.break_secs = break_secs;
    }
}

impl Default for PhaseCycle {
    fn default() -> Self {
        // 25/5 minute pomodoro split.
        Self::new(25 * 60, 5 * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_alternates_phases() {
        let mut cycle = PhaseCycle::default();
        assert_eq!(cycle.current, Phase::Focus);
        assert_eq!(cycle.advance(), Phase::Break);
        assert_eq!(cycle.advance(), Phase::Focus);
    }

    #[test]
    fn current_duration_follows_phase() {
        let mut cycle = PhaseCycle::new(1500, 300);
        assert_eq!(cycle.current_duration(), 1500);
        cycle.advance();
        assert_eq!(cycle.current_duration(), 300);
    }

    #[test]
    fn invalid_persisted_duration_deserializes_to_zero() {
        let cycle: PhaseCycle =
            serde_json::from_str(r#"{"current":"focus","focus_secs":"NaN","break_secs":300}"#)
                .unwrap();
        assert_eq!(cycle.focus_secs, 0);
        assert_eq!(cycle.break_secs, 300);
    }
}
