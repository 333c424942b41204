use thiserror::Error;
use tribunal_arbitration::ArbitrationError;
use tribunal_ledger::LedgerError;
use tribunal_review::ReviewError;
use tribunal_types::ErrorKind;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("review error: {0}")]
    Review(#[from] ReviewError),

    #[error("arbitration error: {0}")]
    Arbitration(#[from] ArbitrationError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl NodeError {
    /// The flat failure kind, for callers that present actionable messages.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Review(e) => e.kind(),
            Self::Arbitration(e) => e.kind(),
            Self::Ledger(e) => e.kind(),
            Self::Config(_) => ErrorKind::Config,
            Self::Snapshot(_) => ErrorKind::Snapshot,
        }
    }
}
