//! Core error types for studydock-core.
//!
//! The widget engines never surface errors to the host: configuration is
//! clamped, audio failures are logged and skipped, unknown geometry is
//! defaulted. These types cover the places where a caller does want to know,
//! mainly the on-disk configuration layer and the audio backends.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studydock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Audio output errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Audio output errors. Always absorbed by the tone scheduler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No output device could be opened
    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Output exists but the platform refuses to resume it yet
    #[error("Audio output is suspended")]
    Suspended,

    /// A tone could not be scheduled on the output
    #[error("Playback failed: {0}")]
    Playback(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<String> for CoreError {
    fn from(message: String) -> Self {
        CoreError::Custom(message)
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
