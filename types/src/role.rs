//! Roles checked against the access gate, and scoring namespaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability an account must hold to perform a gated operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May open review cases for content.
    ReviewCreator,
    /// May take a reviewer slot and vote on content quality.
    Reviewer,
    /// May open dispute cases.
    DisputeCreator,
    /// May take a juror slot and vote on disputes.
    Juror,
    /// May change the reviewer/juror panel sizes.
    Governance,
    /// May advance the scoring round.
    Treasury,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReviewCreator => "review_creator",
            Self::Reviewer => "reviewer",
            Self::DisputeCreator => "dispute_creator",
            Self::Juror => "juror",
            Self::Governance => "governance",
            Self::Treasury => "treasury",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent point namespaces in the score ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Namespace {
    Reviewer,
    Juror,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reviewer => f.write_str("reviewer"),
            Self::Juror => f.write_str("juror"),
        }
    }
}
