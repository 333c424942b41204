use thiserror::Error;
use tribunal_access::AccessError;
use tribunal_types::ErrorKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("access denied: {0}")]
    Access(#[from] AccessError),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(e) => e.kind(),
        }
    }
}
