//! TOML configuration for the panel binary.
//!
//! One file with `[shared]`, `[machine]`, optional `[panel]` and optional
//! `[simulation]` sections, validated as a whole before use.

use std::path::Path;

use els_common::config::{ConfigError, ConfigLoader, MachineConfig, PanelOptions, SharedConfig};
use serde::Deserialize;

/// Parameters of the simulated motion core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Fastest step rate the simulated stepper can follow [Hz].
    #[serde(default = "default_max_step_rate_hz")]
    pub max_step_rate_hz: u64,
    #[serde(default = "default_power_on")]
    pub power_on_at_start: bool,
}

fn default_max_step_rate_hz() -> u64 {
    50_000
}

fn default_power_on() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_step_rate_hz: default_max_step_rate_hz(),
            power_on_at_start: default_power_on(),
        }
    }
}

/// Complete validated configuration bundle.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElsConfig {
    pub shared: SharedConfig,
    pub machine: MachineConfig,
    #[serde(default)]
    pub panel: PanelOptions,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl ElsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.machine.validate()?;
        if self.simulation.max_step_rate_hz == 0 {
            return Err(ConfigError::ValidationError(
                "simulation.max_step_rate_hz must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load and validate the configuration file.
pub fn load_config(path: &Path) -> Result<ElsConfig, ConfigError> {
    let config = ElsConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate configuration from a TOML string (for testing).
pub fn load_config_from_str(content: &str) -> Result<ElsConfig, ConfigError> {
    let config = ElsConfig::from_toml(content)?;
    config.validate()?;
    Ok(config)
}
