//! Application-level configuration loading: storage paths and the timer range.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use time::Duration;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PARTY_GAMES_CONFIG_PATH";
const DEFAULT_SCORES_PATH: &str = "scores.json";
const DEFAULT_WORDS_PATH: &str = "config/words.json";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// File holding the persisted team scores.
    pub scores_path: PathBuf,
    /// File holding the per-mode word lists.
    pub words_path: PathBuf,
    /// Bounds applied to countdown durations requested by clients.
    pub timer: TimerConfig,
}

/// Allowed countdown durations, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Duration used by a fresh session.
    pub default_seconds: u32,
    /// Shortest accepted duration.
    pub min_seconds: u32,
    /// Longest accepted duration.
    pub max_seconds: u32,
    /// Accepted durations are `min_seconds + k * step_seconds`.
    pub step_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_seconds: 60,
            min_seconds: 30,
            max_seconds: 300,
            step_seconds: 15,
        }
    }
}

impl TimerConfig {
    /// Check that `seconds` falls inside the configured range and on a step.
    pub fn accepts(&self, seconds: u32) -> bool {
        if !(self.min_seconds..=self.max_seconds).contains(&seconds) {
            return false;
        }
        self.step_seconds == 0 || (seconds - self.min_seconds) % self.step_seconds == 0
    }

    /// Default countdown length as a [`Duration`].
    pub fn default_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.default_seconds))
    }

    /// Drop inconsistent settings back to the built-in values.
    fn sanitized(self) -> Self {
        if self.min_seconds == 0 || self.min_seconds > self.max_seconds {
            warn!(
                min = self.min_seconds,
                max = self.max_seconds,
                "invalid timer range in config; using defaults"
            );
            return Self::default();
        }
        if !self.accepts(self.default_seconds) {
            warn!(
                default = self.default_seconds,
                "default timer duration outside configured range; using range minimum"
            );
            return Self {
                default_seconds: self.min_seconds,
                ..self
            };
        }
        self
    }
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        scores = %app_config.scores_path.display(),
                        words = %app_config.words_path.display(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            words_path: PathBuf::from(DEFAULT_WORDS_PATH),
            timer: TimerConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    scores_path: Option<PathBuf>,
    words_path: Option<PathBuf>,
    timer: Option<TimerConfig>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            scores_path: value
                .scores_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_PATH)),
            words_path: value
                .words_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDS_PATH)),
            timer: value.timer.unwrap_or_default().sanitized(),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_matches_slider() {
        let timer = TimerConfig::default();
        assert!(timer.accepts(30));
        assert!(timer.accepts(45));
        assert!(timer.accepts(300));
        assert!(!timer.accepts(15));
        assert!(!timer.accepts(50));
        assert!(!timer.accepts(315));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let raw: RawConfig = serde_json::from_str(r#"{"scores_path": "/tmp/s.json"}"#).unwrap();
        let config = AppConfig::from(raw);
        assert_eq!(config.scores_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.words_path, PathBuf::from(DEFAULT_WORDS_PATH));
        assert_eq!(config.timer, TimerConfig::default());
    }

    #[test]
    fn inconsistent_timer_range_falls_back() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"timer": {"min_seconds": 200, "max_seconds": 100}}"#)
                .unwrap();
        assert_eq!(AppConfig::from(raw).timer, TimerConfig::default());

        let raw: RawConfig = serde_json::from_str(
            r#"{"timer": {"default_seconds": 10, "min_seconds": 20, "max_seconds": 100, "step_seconds": 10}}"#,
        )
        .unwrap();
        assert_eq!(AppConfig::from(raw).timer.default_seconds, 20);
    }
}
