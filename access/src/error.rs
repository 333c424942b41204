use thiserror::Error;
use tribunal_types::{AccountId, ErrorKind, Role};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("account {account} does not hold role {role}")]
    Unauthorized { account: AccountId, role: Role },

    #[error("account {0} is not KYC-verified")]
    NotKyced(AccountId),

    #[error("account {0} is banned")]
    Banned(AccountId),
}

impl AccessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::NotKyced(_) => ErrorKind::NotKyced,
            Self::Banned(_) => ErrorKind::Banned,
        }
    }
}
