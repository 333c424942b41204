//! Flat error taxonomy shared across crates.
//!
//! Each crate has its own `thiserror` enum with context; all of them map onto
//! [`ErrorKind`] so calling layers can present an actionable message without
//! matching on every crate's variants.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Unauthorized,
    NotKyced,
    Banned,
    NotFound,
    CapacityExceeded,
    AlreadyAssigned,
    AlreadyAssignedElsewhere,
    ConflictOfInterest,
    NotAssigned,
    AlreadySubmitted,
    Incomplete,
    AlreadyConcluded,
    MissingContentId,
    InvalidParameter,
    Config,
    Snapshot,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
