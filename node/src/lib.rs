//! Tribunal coordinator: wires the review engine, the arbitration engine and
//! the score ledger into one serialized state machine.
//!
//! The coordinator:
//! - Injects the access gate and content directory into both engines
//! - Serializes every mutation behind a single write lock
//! - Publishes engine events to subscribers in commit order
//! - Exposes the read-only ledger queries used by the payout process
//! - Exports and restores integrity-checked snapshots

pub mod config;
pub mod error;
pub mod event;
pub mod snapshot;
pub mod tribunal;

pub use config::TribunalConfig;
pub use error::NodeError;
pub use event::{EventBus, Listener, TribunalEvent, DEFAULT_EVENT_LOG_CAPACITY};
pub use snapshot::{TribunalSnapshot, SNAPSHOT_VERSION};
pub use tribunal::Tribunal;

pub use tribunal_arbitration::{DisputeCase, DisputeRequest, Submission};
pub use tribunal_ledger::VoteTally;
pub use tribunal_review::ReviewCase;
