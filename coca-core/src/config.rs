//! Session configuration, deserialized from host-supplied JSON.

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::session::Mode;
use crate::sound::SoundBank;

/// Built-in palette, in deal order. The reference order a round must reach
/// is the sorted arrangement of whatever was dealt.
pub const DEFAULT_COLORS: [&str; 10] = [
    "red", "blue", "green", "yellow", "purple", "orange", "pink", "brown", "golden", "skyblue",
];

/// Containers dealt when the config does not say otherwise.
pub const DEFAULT_CONTAINER_COUNT: usize = 4;
/// Deal-size bounds for the built-in palette. A custom palette is limited
/// only by its own length.
pub const MIN_CONTAINER_COUNT: usize = 4;
pub const MAX_CONTAINER_COUNT: usize = 8;
/// Challenge-mode check budget.
pub const DEFAULT_ATTEMPT_LIMIT: u32 = 5;
/// Timed-mode countdown start, in seconds.
pub const DEFAULT_TIME_LIMIT: u32 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Recognized configuration options. Every field is optional in the JSON;
/// unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub mode: Mode,
    pub attempt_limit: u32,
    pub time_limit: u32,
    pub container_count: usize,
    /// Custom palette; empty means the built-in one.
    pub colors: Vec<String>,
    pub locale: Option<String>,
    pub sound_effects: SoundBank,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Free,
            attempt_limit: DEFAULT_ATTEMPT_LIMIT,
            time_limit: DEFAULT_TIME_LIMIT,
            container_count: DEFAULT_CONTAINER_COUNT,
            colors: Vec::new(),
            locale: None,
            sound_effects: SoundBank::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The palette a round draws from.
    pub fn palette(&self) -> Vec<String> {
        if self.colors.is_empty() {
            DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()
        } else {
            self.colors.clone()
        }
    }

    /// Container count after bounds checks. Misconfiguration is clamped and
    /// warned about, never fatal.
    pub fn resolved_count(&self) -> usize {
        let palette_len = if self.colors.is_empty() {
            DEFAULT_COLORS.len()
        } else {
            self.colors.len()
        };
        let mut count = self.container_count;
        if count == 0 {
            warn!("containerCount 0 is not playable, using {DEFAULT_CONTAINER_COUNT}");
            count = DEFAULT_CONTAINER_COUNT;
        }
        if self.colors.is_empty()
            && !(MIN_CONTAINER_COUNT..=MAX_CONTAINER_COUNT).contains(&count)
        {
            warn!(
                "containerCount {count} is outside {MIN_CONTAINER_COUNT}..={MAX_CONTAINER_COUNT}, clamping"
            );
            count = count.clamp(MIN_CONTAINER_COUNT, MAX_CONTAINER_COUNT);
        }
        if count > palette_len {
            warn!("{count} containers requested but only {palette_len} colors available");
            count = palette_len;
        }
        count
    }

    pub fn resolved_attempt_limit(&self) -> u32 {
        positive(self.attempt_limit, DEFAULT_ATTEMPT_LIMIT, "attemptLimit")
    }

    pub fn resolved_time_limit(&self) -> u32 {
        positive(self.time_limit, DEFAULT_TIME_LIMIT, "timeLimit")
    }
}

fn positive(value: u32, fallback: u32, name: &str) -> u32 {
    if value == 0 {
        warn!("{name} must be positive, using {fallback}");
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = GameConfig::default();
        assert_eq!(config.mode, Mode::Free);
        assert_eq!(config.attempt_limit, 5);
        assert_eq!(config.time_limit, 30);
        assert_eq!(config.resolved_count(), 4);
        assert_eq!(config.palette().len(), 10);
    }

    #[test]
    fn parses_camel_case_keys() {
        let config = GameConfig::from_json(
            r#"{
                "mode": "challenge",
                "attemptLimit": 3,
                "timeLimit": 60,
                "containerCount": 6,
                "locale": "fa",
                "soundEffects": { "win": "custom/win.ogg" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.mode, Mode::Challenge);
        assert_eq!(config.attempt_limit, 3);
        assert_eq!(config.time_limit, 60);
        assert_eq!(config.resolved_count(), 6);
        assert_eq!(config.locale.as_deref(), Some("fa"));
        assert_eq!(config.sound_effects.win, "custom/win.ogg");
        // Unspecified sounds keep their defaults.
        assert!(!config.sound_effects.start.is_empty());
    }

    #[test]
    fn ignores_unknown_keys() {
        let config =
            GameConfig::from_json(r#"{"allowUserContainerSelection": true, "mode": "timed"}"#)
                .unwrap();
        assert_eq!(config.mode, Mode::Timed);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(GameConfig::from_json("{mode:").is_err());
    }

    #[test]
    fn clamps_count_for_the_builtin_palette() {
        let mut config = GameConfig::default();
        config.container_count = 12;
        assert_eq!(config.resolved_count(), 8);
        config.container_count = 2;
        assert_eq!(config.resolved_count(), 4);
        config.container_count = 0;
        assert_eq!(config.resolved_count(), 4);
    }

    #[test]
    fn custom_palette_lifts_the_upper_bound() {
        let config = GameConfig {
            colors: (0..9).map(|i| format!("c{i}")).collect(),
            container_count: 9,
            ..GameConfig::default()
        };
        assert_eq!(config.resolved_count(), 9);
    }

    #[test]
    fn custom_palette_clamps_to_available_colors() {
        let config = GameConfig {
            colors: vec!["red".to_string(), "blue".to_string()],
            container_count: 6,
            ..GameConfig::default()
        };
        assert_eq!(config.resolved_count(), 2);
    }

    #[test]
    fn zero_limits_resolve_to_defaults() {
        let config = GameConfig {
            attempt_limit: 0,
            time_limit: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.resolved_attempt_limit(), 5);
        assert_eq!(config.resolved_time_limit(), 30);
    }
}
