//! Collaborator traits and the capability checks built on them.

use crate::error::AccessError;
use tribunal_types::{AccountId, ContentId, Role};

/// Answers identity questions about an account.
pub trait AccessGate: Send + Sync {
    fn has_role(&self, account: &AccountId, role: Role) -> bool;

    fn is_kyced(&self, account: &AccountId) -> bool;

    fn is_banned(&self, account: &AccountId) -> bool;
}

/// Answers ownership questions about content assets.
pub trait ContentDirectory: Send + Sync {
    /// The instructor (owner) of a content asset, or `None` if the content is unknown.
    fn instructor_of(&self, content: ContentId) -> Option<AccountId>;
}

/// Fail with `Unauthorized` unless `account` holds `role`.
pub fn require_role(
    gate: &dyn AccessGate,
    account: &AccountId,
    role: Role,
) -> Result<(), AccessError> {
    if !gate.has_role(account, role) {
        tracing::debug!(%account, %role, "role check failed");
        return Err(AccessError::Unauthorized {
            account: account.clone(),
            role,
        });
    }
    Ok(())
}

/// Full participant check: role, then KYC, then ban status.
///
/// Used before a reviewer or juror may occupy a panel slot.
pub fn require_member(
    gate: &dyn AccessGate,
    account: &AccountId,
    role: Role,
) -> Result<(), AccessError> {
    require_role(gate, account, role)?;
    if !gate.is_kyced(account) {
        return Err(AccessError::NotKyced(account.clone()));
    }
    if gate.is_banned(account) {
        return Err(AccessError::Banned(account.clone()));
    }
    Ok(())
}
