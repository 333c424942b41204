//! Interfaces to the external collaborators of the tribunal engines.
//!
//! Identity, role issuance, KYC, bans and the content registry all live
//! outside the core. The engines depend only on the traits in this crate and
//! query them synchronously on every state-changing call; answers are never
//! cached across calls.

pub mod error;
pub mod gate;

pub use error::AccessError;
pub use gate::{require_member, require_role, AccessGate, ContentDirectory};
