//! Nullable access gate: programmable roles, KYC and bans.

use std::collections::HashSet;
use std::sync::Mutex;
use tribunal_access::AccessGate;
use tribunal_types::{AccountId, Role};

/// An in-memory access gate for testing.
/// Thread-safe so it can sit behind the coordinator's `Arc<dyn AccessGate>`.
#[derive(Default)]
pub struct NullAccessGate {
    roles: Mutex<HashSet<(AccountId, Role)>>,
    kyced: Mutex<HashSet<AccountId>>,
    banned: Mutex<HashSet<AccountId>>,
}

impl NullAccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, account: &AccountId, role: Role) {
        self.roles.lock().unwrap().insert((account.clone(), role));
    }

    pub fn revoke(&self, account: &AccountId, role: Role) {
        self.roles.lock().unwrap().remove(&(account.clone(), role));
    }

    pub fn set_kyced(&self, account: &AccountId, kyced: bool) {
        let mut set = self.kyced.lock().unwrap();
        if kyced {
            set.insert(account.clone());
        } else {
            set.remove(account);
        }
    }

    pub fn set_banned(&self, account: &AccountId, banned: bool) {
        let mut set = self.banned.lock().unwrap();
        if banned {
            set.insert(account.clone());
        } else {
            set.remove(account);
        }
    }

    /// Grant `role` and mark the account KYC-verified: a fully eligible panelist.
    pub fn enroll(&self, account: &AccountId, role: Role) {
        self.grant(account, role);
        self.set_kyced(account, true);
    }
}

impl AccessGate for NullAccessGate {
    fn has_role(&self, account: &AccountId, role: Role) -> bool {
        self.roles.lock().unwrap().contains(&(account.clone(), role))
    }

    fn is_kyced(&self, account: &AccountId) -> bool {
        self.kyced.lock().unwrap().contains(account)
    }

    fn is_banned(&self, account: &AccountId) -> bool {
        self.banned.lock().unwrap().contains(account)
    }
}
