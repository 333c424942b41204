//! Shared utilities for the tribunal engine.

pub mod logging;

pub use logging::{init_logging, level_filter, LogFormat, LoggingError};
