//! Governable engine parameters.

use serde::{Deserialize, Serialize};

/// Panel sizes used when new cases are opened.
///
/// Both values are changed only through the governance-gated setters on the
/// coordinator. Open cases keep the capacity they were created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TribunalParams {
    /// Reviewer slots per review case.
    pub required_reviewers: u32,
    /// Juror slots per dispute case.
    pub required_jurors: u32,
}

impl TribunalParams {
    pub const DEFAULT_REQUIRED_REVIEWERS: u32 = 5;
    pub const DEFAULT_REQUIRED_JURORS: u32 = 3;
}

impl Default for TribunalParams {
    fn default() -> Self {
        Self {
            required_reviewers: Self::DEFAULT_REQUIRED_REVIEWERS,
            required_jurors: Self::DEFAULT_REQUIRED_JURORS,
        }
    }
}

/// Which governable parameter changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    RequiredReviewers,
    RequiredJurors,
}
