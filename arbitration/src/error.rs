use crate::conflict::ConflictReason;
use thiserror::Error;
use tribunal_access::AccessError;
use tribunal_types::{AccountId, CaseId, ContentId, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArbitrationError {
    #[error("access denied: {0}")]
    Access(#[from] AccessError),

    #[error("dispute case {0} not found")]
    NotFound(CaseId),

    #[error("{0} is not known to the content directory")]
    ContentNotFound(ContentId),

    #[error("dispute case {case} already has {capacity} jurors")]
    CapacityExceeded { case: CaseId, capacity: u32 },

    #[error("{account} already sits on dispute case {case}")]
    AlreadyAssigned { case: CaseId, account: AccountId },

    #[error("{account} is still assigned to dispute case {active}")]
    AlreadyAssignedElsewhere { account: AccountId, active: CaseId },

    #[error("{account} cannot judge case {case}: {reason}")]
    ConflictOfInterest {
        case: CaseId,
        account: AccountId,
        reason: ConflictReason,
    },

    #[error("{account} is not a juror on case {case}")]
    NotAssigned { case: CaseId, account: AccountId },

    #[error("{account} already submitted a verdict on case {case}")]
    AlreadySubmitted { case: CaseId, account: AccountId },

    #[error("dispute case {0} is already concluded")]
    AlreadyConcluded(CaseId),

    #[error("content-related dispute requires a content id")]
    MissingContentId,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ArbitrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(e) => e.kind(),
            Self::NotFound(_) | Self::ContentNotFound(_) => ErrorKind::NotFound,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::AlreadyAssigned { .. } => ErrorKind::AlreadyAssigned,
            Self::AlreadyAssignedElsewhere { .. } => ErrorKind::AlreadyAssignedElsewhere,
            Self::ConflictOfInterest { .. } => ErrorKind::ConflictOfInterest,
            Self::NotAssigned { .. } => ErrorKind::NotAssigned,
            Self::AlreadySubmitted { .. } => ErrorKind::AlreadySubmitted,
            Self::AlreadyConcluded(_) => ErrorKind::AlreadyConcluded,
            Self::MissingContentId => ErrorKind::MissingContentId,
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
        }
    }
}
