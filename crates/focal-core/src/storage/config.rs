//! TOML-based application configuration.
//!
//! Stores user preferences for the timer and the recommendation gate.
//! Configuration lives at `~/.config/focal/config.toml`.

use serde::{Deserialize, Serialize};

use crate::coerce;
use crate::error::ConfigError;

use super::data_dir;

const CONFIG_FILE: &str = "config.toml";

/// Timer defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Default focus countdown in seconds.
    #[serde(default = "default_focus_secs", deserialize_with = "coerce::secs")]
    pub focus_secs: u64,
    /// Default break countdown in seconds.
    #[serde(default = "default_break_secs", deserialize_with = "coerce::secs")]
    pub break_secs: u64,
    /// Step applied by the up/down adjustment controls.
    #[serde(default = "default_adjust_step_secs", deserialize_with = "coerce::secs")]
    pub adjust_step_secs: u64,
}

/// Recommendation gate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focal/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub recommendations: RecommendationsConfig,
}

fn default_focus_secs() -> u64 {
    25 * 60
}
fn default_break_secs() -> u64 {
    5 * 60
}
fn default_adjust_step_secs() -> u64 {
    60
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_secs: default_focus_secs(),
            break_secs: default_break_secs(),
            adjust_step_secs: default_adjust_step_secs(),
        }
    }
}

impl Default for RecommendationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load() -> Self {
        let Ok(dir) = data_dir() else {
            return Self::default();
        };
        let path = dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("unparseable config at {}: {e}; using defaults", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::SaveFailed {
            path: CONFIG_FILE.into(),
            message: e.to_string(),
        })?;
        let path = dir.join(CONFIG_FILE);
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Read a single value by dotted key, for `config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "timer.focus_secs" => Some(self.timer.focus_secs.to_string()),
            "timer.break_secs" => Some(self.timer.break_secs.to_string()),
            "timer.adjust_step_secs" => Some(self.timer.adjust_step_secs.to_string()),
            "recommendations.enabled" => Some(self.recommendations.enabled.to_string()),
            _ => None,
        }
    }

    /// Set a single value by dotted key and persist, for `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "timer.focus_secs" => self.timer.focus_secs = parse_secs(key, value)?,
            "timer.break_secs" => self.timer.break_secs = parse_secs(key, value)?,
            "timer.adjust_step_secs" => self.timer.adjust_step_secs = parse_secs(key, value)?,
            "recommendations.enabled" => {
                self.recommendations.enabled =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.into(),
                        message: format!("expected true|false, got '{value}'"),
                    })?;
            }
            _ => return Err(ConfigError::MissingKey(key.into())),
        }
        self.save()
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.into(),
        message: format!("expected a whole number of seconds, got '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_pomodoro_split() {
        let config = Config::default();
        assert_eq!(config.timer.focus_secs, 1500);
        assert_eq!(config.timer.break_secs, 300);
        assert_eq!(config.timer.adjust_step_secs, 60);
        assert!(config.recommendations.enabled);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());

        let config: Config = toml::from_str("[timer]\nfocus_secs = 900\n").unwrap();
        assert_eq!(config.timer.focus_secs, 900);
        assert_eq!(config.timer.break_secs, 300);
    }

    #[test]
    fn invalid_durations_coerce_to_zero() {
        let config: Config = toml::from_str("[timer]\nfocus_secs = -10\n").unwrap();
        assert_eq!(config.timer.focus_secs, 0);

        let config: Config = toml::from_str("[timer]\nfocus_secs = \"lots\"\n").unwrap();
        assert_eq!(config.timer.focus_secs, 0);
    }

    #[test]
    fn get_reads_dotted_keys() {
        let config = Config::default();
        assert_eq!(config.get("timer.focus_secs").as_deref(), Some("1500"));
        assert_eq!(config.get("recommendations.enabled").as_deref(), Some("true"));
        assert_eq!(config.get("unknown"), None);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("timer.focus_secs", "abc"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("nope", "1"),
            Err(ConfigError::MissingKey(_))
        ));
    }
}
