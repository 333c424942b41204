//! The scoring round counter.

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use tribunal_access::{require_role, AccessGate};
use tribunal_types::{AccountId, Role, Round};

/// Monotonic round counter. Only the treasury may advance it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCounter {
    current: Round,
}

impl RoundCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Round {
        self.current
    }

    /// Advance by exactly one round and return the new value.
    pub fn advance(
        &mut self,
        gate: &dyn AccessGate,
        caller: &AccountId,
    ) -> Result<Round, LedgerError> {
        require_role(gate, caller, Role::Treasury)?;
        self.current = self.current.next();
        tracing::info!(round = %self.current, %caller, "round advanced");
        Ok(self.current)
    }
}
