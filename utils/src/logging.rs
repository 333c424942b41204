//! Structured logging initialisation.
//!
//! `RUST_LOG` wins when set; otherwise the configured `level` directive string
//! is used (e.g. `"info"`, `"info,tribunal_arbitration=debug"`). Unlike the
//! panicking `init()` helpers, installation failures are returned so a host
//! can report a bad directive from its config file.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt as layer_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for development.
    #[default]
    Human,
    /// One flattened JSON object per event, for log aggregation.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => f.write_str("human"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter {directive:?}: {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("global subscriber already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Parse a level directive string into a filter, ignoring `RUST_LOG`.
pub fn level_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|source| LoggingError::InvalidFilter {
        directive: level.to_string(),
        source,
    })
}

/// Install the global tracing subscriber.
pub fn init_logging(format: LogFormat, level: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(level)?,
    };
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Human => registry.with(layer_fmt::layer().with_target(true)).try_init()?,
        LogFormat::Json => registry
            .with(layer_fmt::layer().json().flatten_event(true).with_target(true))
            .try_init()?,
    }
    Ok(())
}
