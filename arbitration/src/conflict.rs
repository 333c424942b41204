//! Conflict-of-interest rules for content-related disputes.

use crate::error::ArbitrationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tribunal_access::ContentDirectory;
use tribunal_review::ReviewHistory;
use tribunal_types::{AccountId, CaseId, ContentId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictReason {
    /// The juror is the instructor (owner) of the disputed content.
    Instructor,
    /// The juror already submitted a review verdict on the disputed content.
    PriorReviewer,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instructor => f.write_str("juror is the content's instructor"),
            Self::PriorReviewer => f.write_str("juror previously reviewed the content"),
        }
    }
}

/// Reject `juror` if they have an interest in `content`.
///
/// The directory and review history are consulted on every call.
pub fn check_conflict(
    directory: &dyn ContentDirectory,
    history: &dyn ReviewHistory,
    case: CaseId,
    content: ContentId,
    juror: &AccountId,
) -> Result<(), ArbitrationError> {
    let instructor = directory
        .instructor_of(content)
        .ok_or(ArbitrationError::ContentNotFound(content))?;
    let reason = if &instructor == juror {
        Some(ConflictReason::Instructor)
    } else if history.has_reviewed(juror, content) {
        Some(ConflictReason::PriorReviewer)
    } else {
        None
    };
    match reason {
        Some(reason) => {
            tracing::warn!(%case, %content, %juror, %reason, "juror rejected for conflict of interest");
            Err(ArbitrationError::ConflictOfInterest {
                case,
                account: juror.clone(),
                reason,
            })
        }
        None => Ok(()),
    }
}
