//! Fundamental types for the tribunal engine.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! accounts, case and content ids, scoring rounds, roles, governable parameters
//! and the flat error taxonomy.

pub mod account;
pub mod error;
pub mod ids;
pub mod params;
pub mod role;

pub use account::AccountId;
pub use error::ErrorKind;
pub use ids::{CaseId, ContentId, Round};
pub use params::{ParamKind, TribunalParams};
pub use role::{Namespace, Role};
