use thiserror::Error;
use tribunal_access::AccessError;
use tribunal_types::{AccountId, CaseId, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("access denied: {0}")]
    Access(#[from] AccessError),

    #[error("review case {0} not found")]
    NotFound(CaseId),

    #[error("review case {case} already has {capacity} reviewers")]
    CapacityExceeded { case: CaseId, capacity: u32 },

    #[error("{account} already reviews case {case}")]
    AlreadyAssigned { case: CaseId, account: AccountId },

    #[error("{account} is not a reviewer on case {case}")]
    NotAssigned { case: CaseId, account: AccountId },

    #[error("{account} already submitted a verdict on case {case}")]
    AlreadySubmitted { case: CaseId, account: AccountId },

    #[error("review case {case} is incomplete: {submitted} of {required} verdicts")]
    Incomplete {
        case: CaseId,
        submitted: u32,
        required: u32,
    },

    #[error("review case {0} is already concluded")]
    AlreadyConcluded(CaseId),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ReviewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(e) => e.kind(),
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::AlreadyAssigned { .. } => ErrorKind::AlreadyAssigned,
            Self::NotAssigned { .. } => ErrorKind::NotAssigned,
            Self::AlreadySubmitted { .. } => ErrorKind::AlreadySubmitted,
            Self::Incomplete { .. } => ErrorKind::Incomplete,
            Self::AlreadyConcluded(_) => ErrorKind::AlreadyConcluded,
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
        }
    }
}
