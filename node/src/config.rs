//! Coordinator configuration with TOML file support.

use serde::{Deserialize, Serialize};
use tribunal_types::TribunalParams;
use tribunal_utils::LogFormat;

use crate::event::DEFAULT_EVENT_LOG_CAPACITY;
use crate::NodeError;

/// Configuration for a tribunal coordinator.
///
/// Can be loaded from a TOML file via [`TribunalConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TribunalConfig {
    /// Reviewer slots for newly opened review cases.
    #[serde(default = "default_required_reviewers")]
    pub required_reviewers: u32,

    /// Juror seats for newly opened disputes.
    #[serde(default = "default_required_jurors")]
    pub required_jurors: u32,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Published events retained for `drain_events`. Zero disables retention.
    #[serde(default = "default_event_log_capacity")]
    pub event_log_capacity: usize,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_required_reviewers() -> u32 {
    TribunalParams::DEFAULT_REQUIRED_REVIEWERS
}

fn default_required_jurors() -> u32 {
    TribunalParams::DEFAULT_REQUIRED_JURORS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_event_log_capacity() -> usize {
    DEFAULT_EVENT_LOG_CAPACITY
}

// ── Impl ───────────────────────────────────────────────────────────────

impl TribunalConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Panels must have at least one seat.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.required_reviewers == 0 {
            return Err(NodeError::Config("required_reviewers must be at least 1".into()));
        }
        if self.required_jurors == 0 {
            return Err(NodeError::Config("required_jurors must be at least 1".into()));
        }
        Ok(())
    }

    /// Install the global tracing subscriber described by this configuration.
    ///
    /// Call once per process, before constructing the coordinator.
    pub fn init_logging(&self) -> Result<(), NodeError> {
        tribunal_utils::init_logging(self.log_format, &self.log_level)
            .map_err(|e| NodeError::Config(e.to_string()))
    }

    /// The governable parameters this configuration seeds.
    pub fn params(&self) -> TribunalParams {
        TribunalParams {
            required_reviewers: self.required_reviewers,
            required_jurors: self.required_jurors,
        }
    }
}

impl Default for TribunalConfig {
    fn default() -> Self {
        Self {
            required_reviewers: default_required_reviewers(),
            required_jurors: default_required_jurors(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            event_log_capacity: default_event_log_capacity(),
        }
    }
}
