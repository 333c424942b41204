//! Events emitted by the review engine for the coordinator to publish.

use tribunal_types::{AccountId, CaseId, ContentId, Round};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReviewEvent {
    CaseCreated {
        case_id: CaseId,
        content_id: ContentId,
        score_weight: u64,
    },
    ReviewerAssigned {
        case_id: CaseId,
        reviewer: AccountId,
    },
    VerdictSubmitted {
        case_id: CaseId,
        reviewer: AccountId,
        value: bool,
    },
    /// The case concluded; `rewarded` lists reviewers credited in `round`.
    CaseConcluded {
        case_id: CaseId,
        content_id: ContentId,
        outcome: bool,
        round: Round,
        rewarded: Vec<AccountId>,
    },
    RequiredReviewersChanged {
        old: u32,
        new: u32,
    },
}
