//! Events emitted by the arbitration engine.

use tribunal_types::{AccountId, CaseId, ContentId, Round};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArbitrationEvent {
    CaseCreated {
        case_id: CaseId,
        scope: u8,
        content_id: Option<ContentId>,
    },
    JurorAssigned {
        case_id: CaseId,
        juror: AccountId,
    },
    VerdictSubmitted {
        case_id: CaseId,
        juror: AccountId,
        value: bool,
    },
    /// Early majority reached; `rewarded` jurors earned a point in `round`.
    CaseConcluded {
        case_id: CaseId,
        outcome: bool,
        round: Round,
        rewarded: Vec<AccountId>,
    },
    LateVerdictRecorded {
        case_id: CaseId,
        juror: AccountId,
        value: bool,
        matched: bool,
    },
    RequiredJurorsChanged {
        old: u32,
        new: u32,
    },
}
