//! User-supplied context for duration recommendations.
//!
//! A recommendation only makes sense once the user has said how much energy
//! they have and what kind of work they are about to do; the time of day is
//! read from the wall clock.

use std::fmt;
use std::str::FromStr;

use chrono::{Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    pub fn name(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnergyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "medium" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            other => Err(ValidationError::InvalidValue {
                field: "energy".into(),
                message: format!("expected low|medium|high, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    DeepWork,
    Creative,
    Admin,
    Learning,
}

impl TaskType {
    pub fn name(&self) -> &'static str {
        match self {
            TaskType::DeepWork => "deep-work",
            TaskType::Creative => "creative",
            TaskType::Admin => "admin",
            TaskType::Learning => "learning",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deep-work" | "deepwork" => Ok(TaskType::DeepWork),
            "creative" => Ok(TaskType::Creative),
            "admin" => Ok(TaskType::Admin),
            "learning" => Ok(TaskType::Learning),
            other => Err(ValidationError::InvalidValue {
                field: "task".into(),
                message: format!("expected deep-work|creative|admin|learning, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Classify an hour of day (0-23).
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            18..=22 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn now() -> Self {
        Self::from_hour(Utc::now().hour() as u8)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }

    /// Late hours call for shorter focus blocks.
    pub fn is_winding_down(&self) -> bool {
        matches!(self, TimeOfDay::Evening | TimeOfDay::Night)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_classification_covers_the_day() {
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
    }

    #[test]
    fn parses_user_input() {
        assert_eq!("HIGH".parse::<EnergyLevel>().unwrap(), EnergyLevel::High);
        assert_eq!("deep-work".parse::<TaskType>().unwrap(), TaskType::DeepWork);
        assert_eq!("deepwork".parse::<TaskType>().unwrap(), TaskType::DeepWork);
        assert!("sleepy".parse::<EnergyLevel>().is_err());
        assert!("gaming".parse::<TaskType>().is_err());
    }
}
