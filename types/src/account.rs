//! Account identifier for participants (reviewers, jurors, instructors, operators).

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque platform account.
///
/// The engine never interprets the contents; identity, roles and KYC status
/// are resolved through the access gate.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw account string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
