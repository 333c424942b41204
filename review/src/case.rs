//! Review case state.

use crate::tally::VoteCount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tribunal_types::{AccountId, CaseId, ContentId, Round};

/// A single content-quality review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCase {
    pub id: CaseId,
    /// The content asset under review.
    pub content_id: ContentId,
    /// Points credited to each reviewer who votes with the outcome.
    pub score_weight: u64,
    /// Reviewer slots, fixed when the case is opened.
    pub capacity: u32,
    /// Assigned reviewers in assignment order. No account appears twice.
    pub reviewers: Vec<AccountId>,
    /// Submitted verdicts. Keys are always members of `reviewers`.
    pub verdicts: BTreeMap<AccountId, bool>,
    /// `Some` once concluded; immutable afterwards.
    pub outcome: Option<bool>,
    pub created_round: Round,
    pub concluded_round: Option<Round>,
}

impl ReviewCase {
    pub fn new(
        id: CaseId,
        content_id: ContentId,
        score_weight: u64,
        capacity: u32,
        created_round: Round,
    ) -> Self {
        Self {
            id,
            content_id,
            score_weight,
            capacity,
            reviewers: Vec::new(),
            verdicts: BTreeMap::new(),
            outcome: None,
            created_round,
            concluded_round: None,
        }
    }

    pub fn is_concluded(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_full(&self) -> bool {
        self.reviewers.len() >= self.capacity as usize
    }

    pub fn is_reviewer(&self, account: &AccountId) -> bool {
        self.reviewers.contains(account)
    }

    pub fn has_submitted(&self, account: &AccountId) -> bool {
        self.verdicts.contains_key(account)
    }

    /// Every slot is occupied and every occupant has submitted.
    pub fn is_complete(&self) -> bool {
        self.is_full() && self.verdicts.len() == self.reviewers.len()
    }

    pub fn count(&self) -> VoteCount {
        VoteCount::from_values(self.verdicts.values().copied())
    }
}
