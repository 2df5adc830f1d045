//! Configuration loading traits and types.
//!
//! All ELS configuration is TOML. Any deserializable struct can be loaded
//! through [`ConfigLoader`]; the sections defined here are embedded by the
//! application's own configuration struct.
//!
//! # Usage
//!
//! ```rust,no_run
//! use els_common::config::{ConfigLoader, ConfigError, MachineConfig, SharedConfig};
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Debug, Deserialize)]
//! struct MyAppConfig {
//!     shared: SharedConfig,
//!     machine: MachineConfig,
//! }
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = MyAppConfig::load(Path::new("els.toml"))?;
//!     config.machine.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ratio::Leadscrew;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "els-panel"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Leadscrew and drive parameters the feed ratios are derived from.
///
/// # TOML Example
///
/// ```toml
/// [machine]
/// leadscrew = { tpi = 12 }
/// stepper_resolution = 200
/// stepper_microsteps = 8
/// encoder_resolution = 4096
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    pub leadscrew: Leadscrew,
    /// Full steps per stepper revolution.
    #[serde(default = "default_stepper_resolution")]
    pub stepper_resolution: u32,
    #[serde(default = "default_stepper_microsteps")]
    pub stepper_microsteps: u32,
    /// Spindle encoder counts per revolution (after quadrature).
    #[serde(default = "default_encoder_resolution")]
    pub encoder_resolution: u32,
}

fn default_stepper_resolution() -> u32 {
    200
}

fn default_stepper_microsteps() -> u32 {
    8
}

fn default_encoder_resolution() -> u32 {
    4096
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            leadscrew: Leadscrew::Tpi(12),
            stepper_resolution: default_stepper_resolution(),
            stepper_microsteps: default_stepper_microsteps(),
            encoder_resolution: default_encoder_resolution(),
        }
    }
}

impl MachineConfig {
    /// Reject zero leadscrew, stepper or encoder parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("leadscrew", self.leadscrew.raw()),
            ("stepper_resolution", self.stepper_resolution),
            ("stepper_microsteps", self.stepper_microsteps),
            ("encoder_resolution", self.encoder_resolution),
        ];
        for (name, v) in checks {
            if v == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "machine.{name} must be > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Panel behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelOptions {
    /// Gearbox fitted: SET cycles gear settings. Without it SET shows a
    /// "no settings" notice.
    #[serde(default = "default_true")]
    pub use_gearbox: bool,

    /// Ignore UP/DOWN while the spindle turns.
    #[serde(default)]
    pub ignore_keys_when_running: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            use_gearbox: true,
            ignore_keys_when_running: false,
        }
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
