//! Recommendation computation and gating.
//!
//! The gate decides when a recommendation card may be shown and what it
//! suggests. Visibility is deliberately strict: both context inputs must be
//! set, and the card appears at most once per session -- accepting or
//! dismissing it keeps it hidden until the front-end explicitly re-arms it.

use serde::{Deserialize, Serialize};

use super::context::{EnergyLevel, TaskType, TimeOfDay};
use crate::coerce;

/// Focus block lengths in minutes, ordered shortest to longest.
const FOCUS_TIERS_MIN: [u64; 4] = [15, 25, 45, 60];

/// Breaks stretch once the focus block reaches this length.
const LONG_FOCUS_MIN: u64 = 45;

/// A suggested focus/break duration pair for the user's stated context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(deserialize_with = "coerce::secs")]
    pub focus_secs: u64,
    #[serde(deserialize_with = "coerce::secs")]
    pub break_secs: u64,
    pub time_of_day: TimeOfDay,
    pub energy: EnergyLevel,
    pub task_type: TaskType,
}

/// Compute the suggested durations for a context.
///
/// Starts from an energy tier, drops one tier for late hours and for admin
/// work, and grants the longest tier to morning deep work at high energy.
pub fn recommend(energy: EnergyLevel, task_type: TaskType, time_of_day: TimeOfDay) -> Recommendation {
    let mut tier: i8 = match energy {
        EnergyLevel::Low => 0,
        EnergyLevel::Medium => 1,
        EnergyLevel::High => 2,
    };
    if time_of_day.is_winding_down() {
        tier -= 1;
    }
    if task_type == TaskType::Admin {
        tier -= 1;
    }
    if task_type == TaskType::DeepWork
        && energy == EnergyLevel::High
        && time_of_day == TimeOfDay::Morning
    {
        tier += 1;
    }

    let tier = tier.clamp(0, FOCUS_TIERS_MIN.len() as i8 - 1) as usize;
    let focus_min = FOCUS_TIERS_MIN[tier];
    let break_min = if focus_min >= LONG_FOCUS_MIN { 10 } else { 5 };

    Recommendation {
        focus_secs: focus_min * 60,
        break_secs: break_min * 60,
        time_of_day,
        energy,
        task_type,
    }
}

/// Holds the user's context inputs and answers whether the card is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationGate {
    energy: Option<EnergyLevel>,
    task_type: Option<TaskType>,
}

impl RecommendationGate {
    pub fn energy(&self) -> Option<EnergyLevel> {
        self.energy
    }

    pub fn task_type(&self) -> Option<TaskType> {
        self.task_type
    }

    pub fn set_energy(&mut self, energy: EnergyLevel) {
        self.energy = Some(energy);
    }

    pub fn set_task_type(&mut self, task_type: TaskType) {
        self.task_type = Some(task_type);
    }

    /// Both context inputs are set.
    pub fn is_ready(&self) -> bool {
        self.energy.is_some() && self.task_type.is_some()
    }

    /// The card for the current context, or `None` while it is gated.
    ///
    /// `accepted` and `dismissed` are the session's acceptance state and the
    /// store's dismissal flag; either one keeps the card hidden.
    pub fn card_at(
        &self,
        time_of_day: TimeOfDay,
        accepted: bool,
        dismissed: bool,
    ) -> Option<Recommendation> {
        if accepted || dismissed {
            return None;
        }
        match (self.energy, self.task_type) {
            (Some(energy), Some(task_type)) => Some(recommend(energy, task_type, time_of_day)),
            _ => None,
        }
    }
}
