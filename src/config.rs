use serde::Deserialize;

use crate::error::ConfigError;

/// What an inverter returns when its child is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InverterRunningPolicy {
    /// Return `Running`, so the child can be resumed.
    #[default]
    Propagate,
    /// Return `Invalid`. The child is still recorded as running.
    Invalidate,
}

/// What a selector does with its children when all of them failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustedPolicy {
    #[default]
    ResetAll,
    ResetNone,
}

/// Behavior switches of the built-in nodes.
///
/// ```
/// # use agent_mind::{EngineConfig, InverterRunningPolicy};
/// let config = EngineConfig::from_yaml("inverter_running: invalidate").unwrap();
/// assert_eq!(config.inverter_running, InverterRunningPolicy::Invalidate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub inverter_running: InverterRunningPolicy,
    pub selector_exhausted: ExhaustedPolicy,
}

impl EngineConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
