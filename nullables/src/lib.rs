//! Nullable infrastructure for deterministic testing.
//!
//! The external collaborators (access gate, content directory) are abstracted
//! behind traits in `tribunal-access`. This crate provides in-memory
//! implementations that:
//! - Return deterministic answers
//! - Can be controlled programmatically between calls
//! - Never touch the network or a real identity service
//!
//! Usage: inject these instead of the platform adapters in tests.

pub mod directory;
pub mod gate;

pub use directory::NullContentDirectory;
pub use gate::NullAccessGate;
