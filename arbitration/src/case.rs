//! Dispute case state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tribunal_review::VoteCount;
use tribunal_types::{AccountId, CaseId, ContentId, Round};

/// What a dispute creator supplies when opening a case.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeRequest {
    /// Caller-defined dispute category.
    pub scope: u8,
    pub question: String,
    /// Whether the dispute concerns a content asset.
    pub content_related: bool,
    /// Required when `content_related` is set.
    pub content_id: Option<ContentId>,
    /// Opaque, scope-specific payload. Never parsed here.
    pub aux_data: Vec<u8>,
    pub aux_account: Option<AccountId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeCase {
    pub id: CaseId,
    pub scope: u8,
    pub question: String,
    pub content_related: bool,
    pub content_id: Option<ContentId>,
    pub aux_data: Vec<u8>,
    pub aux_account: Option<AccountId>,
    /// Juror seats, fixed when the case is opened.
    pub capacity: u32,
    /// Seated jurors in assignment order.
    pub jurors: Vec<AccountId>,
    /// Verdicts submitted before conclusion.
    pub verdicts: BTreeMap<AccountId, bool>,
    /// Verdicts submitted after conclusion. Never affect `outcome`.
    pub late_verdicts: BTreeMap<AccountId, bool>,
    pub outcome: Option<bool>,
    pub created_round: Round,
    pub concluded_round: Option<Round>,
}

impl DisputeCase {
    pub fn new(id: CaseId, request: DisputeRequest, capacity: u32, created_round: Round) -> Self {
        Self {
            id,
            scope: request.scope,
            question: request.question,
            content_related: request.content_related,
            content_id: request.content_id,
            aux_data: request.aux_data,
            aux_account: request.aux_account,
            capacity,
            jurors: Vec::new(),
            verdicts: BTreeMap::new(),
            late_verdicts: BTreeMap::new(),
            outcome: None,
            created_round,
            concluded_round: None,
        }
    }

    pub fn is_concluded(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_full(&self) -> bool {
        self.jurors.len() >= self.capacity as usize
    }

    pub fn is_juror(&self, account: &AccountId) -> bool {
        self.jurors.contains(account)
    }

    /// Whether `account` has voted on this case, on time or late.
    pub fn has_submitted(&self, account: &AccountId) -> bool {
        self.verdicts.contains_key(account) || self.late_verdicts.contains_key(account)
    }

    /// Count of verdicts submitted before conclusion.
    pub fn count(&self) -> VoteCount {
        VoteCount::from_values(self.verdicts.values().copied())
    }

    /// Seated jurors who have not voted yet.
    pub fn pending_jurors(&self) -> impl Iterator<Item = &AccountId> {
        self.jurors.iter().filter(|j| !self.has_submitted(j))
    }
}
