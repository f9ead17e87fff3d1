//! TOML-based application configuration.
//!
//! Stores the values the host hands the widgets:
//! - Session lengths and round count
//! - Audio mute
//! - Widget placement and fallback sizes
//!
//! Configuration is stored at `~/.config/studydock/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::drag::{Point, Size};
use crate::error::ConfigError;
use crate::timer::SessionConfig;
use crate::widget::{WidgetConfig, WidgetKind};

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_study_minutes")]
    pub study_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default)]
    pub skip_final_break: bool,
}

/// Audio configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AudioConfig {
    #[serde(default)]
    pub muted: bool,
}

/// Widget placement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetLayoutConfig {
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(default = "default_initial_offset")]
    pub initial_x: f64,
    #[serde(default = "default_initial_offset")]
    pub initial_y: f64,
    #[serde(default = "default_timer_size")]
    pub timer_width: f64,
    #[serde(default = "default_timer_size")]
    pub timer_height: f64,
    #[serde(default = "default_player_width")]
    pub player_width: f64,
    #[serde(default = "default_player_height")]
    pub player_height: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studydock/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub widget: WidgetLayoutConfig,
}

// Default functions
fn default_study_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_rounds() -> u32 {
    4
}
fn default_true() -> bool {
    true
}
fn default_initial_offset() -> f64 {
    20.0
}
fn default_timer_size() -> f64 {
    220.0
}
fn default_player_width() -> f64 {
    400.0
}
fn default_player_height() -> f64 {
    225.0
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            study_minutes: default_study_minutes(),
            break_minutes: default_break_minutes(),
            rounds: default_rounds(),
            skip_final_break: false,
        }
    }
}

impl Default for WidgetLayoutConfig {
    fn default() -> Self {
        Self {
            draggable: true,
            initial_x: default_initial_offset(),
            initial_y: default_initial_offset(),
            timer_width: default_timer_size(),
            timer_height: default_timer_size(),
            player_width: default_player_width(),
            player_height: default_player_height(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => {
                        let parsed = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(parsed.into())
                    }
                    serde_json::Value::Number(_) => value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/studydock"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default config");
            Self::default()
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value has the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig::new(self.timer.study_minutes, self.timer.break_minutes, self.timer.rounds)
            .with_skip_final_break(self.timer.skip_final_break)
    }

    /// Inbound widget configuration for a widget of `kind`.
    pub fn widget_config(&self, kind: WidgetKind) -> WidgetConfig {
        let fallback_size = match kind {
            WidgetKind::Timer => Size::new(self.widget.timer_width, self.widget.timer_height),
            WidgetKind::MusicPlayer => Size::new(self.widget.player_width, self.widget.player_height),
        };
        WidgetConfig {
            study_minutes: self.timer.study_minutes,
            break_minutes: self.timer.break_minutes,
            rounds: self.timer.rounds,
            skip_final_break: self.timer.skip_final_break,
            muted: self.audio.muted,
            draggable: self.widget.draggable,
            initial_position: Point::new(self.widget.initial_x, self.widget.initial_y),
            fallback_size: (!fallback_size.is_degenerate()).then_some(fallback_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.timer.study_minutes, 25);
        assert_eq!(cfg.timer.break_minutes, 5);
        assert_eq!(cfg.timer.rounds, 4);
        assert!(!cfg.timer.skip_final_break);
        assert!(!cfg.audio.muted);
        assert!(cfg.widget.draggable);
        assert_eq!(cfg.widget.timer_width, 220.0);
        assert_eq!(cfg.widget.player_width, 400.0);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[timer]\nstudy_minutes = 50\n").unwrap();
        assert_eq!(cfg.timer.study_minutes, 50);
        assert_eq!(cfg.timer.break_minutes, 5);
        assert!(cfg.widget.draggable);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.study_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("audio.muted").as_deref(), Some("false"));
        assert!(cfg.get("timer.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("timer.rounds", "6").unwrap();
        cfg.set("audio.muted", "true").unwrap();
        cfg.set("widget.initial_x", "120.5").unwrap();
        assert_eq!(cfg.timer.rounds, 6);
        assert!(cfg.audio.muted);
        assert_eq!(cfg.widget.initial_x, 120.5);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("timer.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("audio.muted", "loud"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("timer.rounds", "-1"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("timer.study_minutes", "45").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().timer.study_minutes, 45);
    }

    #[test]
    fn load_from_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn widget_config_uses_kind_specific_size() {
        let cfg = Config::default();
        let timer = cfg.widget_config(WidgetKind::Timer);
        let player = cfg.widget_config(WidgetKind::MusicPlayer);
        assert_eq!(timer.fallback_size, Some(Size::new(220.0, 220.0)));
        assert_eq!(player.fallback_size, Some(Size::new(400.0, 225.0)));
        assert_eq!(timer.initial_position, Point::new(20.0, 20.0));
        assert_eq!(timer.session(), SessionConfig::new(25, 5, 4));
    }
}
