//! Review engine: owns the review case table and drives each case from
//! creation through reviewer assignment, verdicts and conclusion.

use crate::case::ReviewCase;
use crate::error::ReviewError;
use crate::events::ReviewEvent;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info};
use tribunal_access::{require_member, require_role, AccessGate};
use tribunal_ledger::ScoreLedger;
use tribunal_types::{AccountId, CaseId, ContentId, Namespace, Role, Round};

/// Answers whether an account has judged a piece of content before.
pub trait ReviewHistory {
    /// True iff `account` submitted a verdict on any review case for `content`.
    fn has_reviewed(&self, account: &AccountId, content: ContentId) -> bool;
}

pub struct ReviewEngine {
    gate: Arc<dyn AccessGate>,
    cases: BTreeMap<CaseId, ReviewCase>,
    next_id: CaseId,
    required_reviewers: u32,
    /// (content, reviewer) pairs with a submitted verdict.
    reviewed: BTreeSet<(ContentId, AccountId)>,
    /// Pending events for the coordinator to publish.
    pending_events: Vec<ReviewEvent>,
}

impl ReviewEngine {
    pub fn new(gate: Arc<dyn AccessGate>, required_reviewers: u32) -> Self {
        Self {
            gate,
            cases: BTreeMap::new(),
            next_id: CaseId::FIRST,
            required_reviewers,
            reviewed: BTreeSet::new(),
            pending_events: Vec::new(),
        }
    }

    /// Rebuild an engine from a previously exported case table.
    pub fn from_cases(
        gate: Arc<dyn AccessGate>,
        required_reviewers: u32,
        cases: Vec<ReviewCase>,
    ) -> Self {
        let mut engine = Self::new(gate, required_reviewers);
        for case in cases {
            for reviewer in case.verdicts.keys() {
                engine.reviewed.insert((case.content_id, reviewer.clone()));
            }
            if case.id >= engine.next_id {
                engine.next_id = case.id.next();
            }
            engine.cases.insert(case.id, case);
        }
        engine
    }

    /// Open a review case for `content_id`. Requires [`Role::ReviewCreator`].
    pub fn create_case(
        &mut self,
        caller: &AccountId,
        content_id: ContentId,
        score_weight: u64,
        now: Round,
    ) -> Result<CaseId, ReviewError> {
        require_role(self.gate.as_ref(), caller, Role::ReviewCreator)?;

        let id = self.next_id;
        self.next_id = id.next();
        self.cases.insert(
            id,
            ReviewCase::new(id, content_id, score_weight, self.required_reviewers, now),
        );

        info!(case_id = %id, %content_id, score_weight, %caller, "review case created");
        self.pending_events.push(ReviewEvent::CaseCreated {
            case_id: id,
            content_id,
            score_weight,
        });
        Ok(id)
    }

    /// Take a reviewer slot on `case_id`.
    pub fn assign_reviewer(
        &mut self,
        caller: &AccountId,
        case_id: CaseId,
    ) -> Result<(), ReviewError> {
        require_member(self.gate.as_ref(), caller, Role::Reviewer)?;

        let case = self
            .cases
            .get_mut(&case_id)
            .ok_or(ReviewError::NotFound(case_id))?;
        if case.is_reviewer(caller) {
            return Err(ReviewError::AlreadyAssigned {
                case: case_id,
                account: caller.clone(),
            });
        }
        if case.is_full() {
            return Err(ReviewError::CapacityExceeded {
                case: case_id,
                capacity: case.capacity,
            });
        }

        case.reviewers.push(caller.clone());
        debug!(%case_id, reviewer = %caller, seats = case.reviewers.len(), "reviewer assigned");
        self.pending_events.push(ReviewEvent::ReviewerAssigned {
            case_id,
            reviewer: caller.clone(),
        });
        Ok(())
    }

    /// Record the caller's pass/fail verdict.
    pub fn submit_verdict(
        &mut self,
        caller: &AccountId,
        case_id: CaseId,
        value: bool,
    ) -> Result<(), ReviewError> {
        let case = self
            .cases
            .get_mut(&case_id)
            .ok_or(ReviewError::NotFound(case_id))?;
        if !case.is_reviewer(caller) {
            return Err(ReviewError::NotAssigned {
                case: case_id,
                account: caller.clone(),
            });
        }
        if case.has_submitted(caller) {
            return Err(ReviewError::AlreadySubmitted {
                case: case_id,
                account: caller.clone(),
            });
        }

        case.verdicts.insert(caller.clone(), value);
        self.reviewed.insert((case.content_id, caller.clone()));
        debug!(%case_id, reviewer = %caller, value, "review verdict submitted");
        self.pending_events.push(ReviewEvent::VerdictSubmitted {
            case_id,
            reviewer: caller.clone(),
            value,
        });
        Ok(())
    }

    /// Fix the outcome of a fully-voted case and credit the majority.
    ///
    /// Open to any caller. Returns the outcome.
    pub fn conclude(
        &mut self,
        caller: &AccountId,
        case_id: CaseId,
        ledger: &mut ScoreLedger,
    ) -> Result<bool, ReviewError> {
        let case = self
            .cases
            .get_mut(&case_id)
            .ok_or(ReviewError::NotFound(case_id))?;
        if case.is_concluded() {
            return Err(ReviewError::AlreadyConcluded(case_id));
        }
        if !case.is_complete() {
            return Err(ReviewError::Incomplete {
                case: case_id,
                submitted: case.verdicts.len() as u32,
                required: case.capacity,
            });
        }

        let outcome = case.count().majority();
        let round = ledger.current_round();
        case.outcome = Some(outcome);
        case.concluded_round = Some(round);

        let mut rewarded = Vec::new();
        for reviewer in &case.reviewers {
            let matched = case.verdicts.get(reviewer) == Some(&outcome);
            if matched {
                ledger.credit(Namespace::Reviewer, reviewer, case.score_weight);
                rewarded.push(reviewer.clone());
            }
            ledger.record_vote(Namespace::Reviewer, reviewer, matched);
        }

        info!(
            %case_id,
            content_id = %case.content_id,
            outcome,
            %round,
            rewarded = rewarded.len(),
            %caller,
            "review case concluded"
        );
        self.pending_events.push(ReviewEvent::CaseConcluded {
            case_id,
            content_id: case.content_id,
            outcome,
            round,
            rewarded,
        });
        Ok(outcome)
    }

    /// Change the reviewer panel size for cases opened from now on.
    pub fn set_required_reviewers(
        &mut self,
        caller: &AccountId,
        required: u32,
    ) -> Result<(), ReviewError> {
        require_role(self.gate.as_ref(), caller, Role::Governance)?;
        if required == 0 {
            return Err(ReviewError::InvalidParameter(
                "required reviewers must be at least 1".into(),
            ));
        }
        let old = std::mem::replace(&mut self.required_reviewers, required);
        info!(old, new = required, %caller, "required reviewers changed");
        self.pending_events
            .push(ReviewEvent::RequiredReviewersChanged { old, new: required });
        Ok(())
    }

    pub fn required_reviewers(&self) -> u32 {
        self.required_reviewers
    }

    pub fn case(&self, case_id: CaseId) -> Option<&ReviewCase> {
        self.cases.get(&case_id)
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// All cases in id order.
    pub fn cases(&self) -> impl Iterator<Item = &ReviewCase> {
        self.cases.values()
    }

    /// Ids of every review case opened for `content`.
    pub fn cases_for_content(&self, content: ContentId) -> Vec<CaseId> {
        self.cases
            .values()
            .filter(|c| c.content_id == content)
            .map(|c| c.id)
            .collect()
    }

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> Vec<ReviewEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

impl ReviewHistory for ReviewEngine {
    fn has_reviewed(&self, account: &AccountId, content: ContentId) -> bool {
        self.reviewed.contains(&(content, account.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribunal_types::ErrorKind;
    use tribunal_nullables::NullAccessGate;

    fn acct(s: &str) -> AccountId {
        AccountId::new(s)
    }

    struct Fixture {
        gate: Arc<NullAccessGate>,
        engine: ReviewEngine,
        ledger: ScoreLedger,
        creator: AccountId,
        reviewers: Vec<AccountId>,
    }

    fn fixture(required: u32) -> Fixture {
        let gate = Arc::new(NullAccessGate::new());
        let creator = acct("creator");
        gate.grant(&creator, Role::ReviewCreator);
        let reviewers: Vec<AccountId> = (1..=6).map(|i| acct(&format!("r{i}"))).collect();
        for r in &reviewers {
            gate.enroll(r, Role::Reviewer);
        }
        Fixture {
            engine: ReviewEngine::new(gate.clone(), required),
            gate,
            ledger: ScoreLedger::new(),
            creator,
            reviewers,
        }
    }

    /// Helper: open a case and fill every slot with the first reviewers.
    fn open_full_case(f: &mut Fixture, content: u64, weight: u64) -> CaseId {
        let id = f
            .engine
            .create_case(&f.creator, ContentId::new(content), weight, Round::GENESIS)
            .unwrap();
        let required = f.engine.required_reviewers() as usize;
        for r in f.reviewers.iter().take(required) {
            f.engine.assign_reviewer(r, id).unwrap();
        }
        id
    }

    // ── Creation ────────────────────────────────────────────────────────

    #[test]
    fn case_ids_are_sequential_from_one() {
        let mut f = fixture(5);
        let a = f
            .engine
            .create_case(&f.creator, ContentId::new(7), 50, Round::GENESIS)
            .unwrap();
        let b = f
            .engine
            .create_case(&f.creator, ContentId::new(8), 10, Round::GENESIS)
            .unwrap();
        assert_eq!(a, CaseId::new(1));
        assert_eq!(b, CaseId::new(2));
        assert_eq!(f.engine.case_count(), 2);

        let events = f.engine.drain_events();
        assert_eq!(
            events[0],
            ReviewEvent::CaseCreated {
                case_id: a,
                content_id: ContentId::new(7),
                score_weight: 50
            }
        );
    }

    #[test]
    fn creation_requires_role() {
        let mut f = fixture(5);
        let err = f
            .engine
            .create_case(&acct("nobody"), ContentId::new(7), 50, Round::GENESIS)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(f.engine.case_count(), 0);
        assert!(f.engine.drain_events().is_empty());
    }

    // ── Assignment ──────────────────────────────────────────────────────

    #[test]
    fn assignment_checks_identity_then_case() {
        let mut f = fixture(5);
        let id = f
            .engine
            .create_case(&f.creator, ContentId::new(7), 50, Round::GENESIS)
            .unwrap();

        let outsider = acct("outsider");
        assert_eq!(
            f.engine.assign_reviewer(&outsider, id).unwrap_err().kind(),
            ErrorKind::Unauthorized
        );
        f.gate.grant(&outsider, Role::Reviewer);
        assert_eq!(
            f.engine.assign_reviewer(&outsider, id).unwrap_err().kind(),
            ErrorKind::NotKyced
        );
        f.gate.set_kyced(&outsider, true);
        f.gate.set_banned(&outsider, true);
        assert_eq!(
            f.engine.assign_reviewer(&outsider, id).unwrap_err().kind(),
            ErrorKind::Banned
        );
        f.gate.set_banned(&outsider, false);
        assert_eq!(
            f.engine
                .assign_reviewer(&outsider, CaseId::new(99))
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        f.engine.assign_reviewer(&outsider, id).unwrap();
        assert_eq!(f.engine.case(id).unwrap().reviewers, vec![outsider]);
    }

    #[test]
    fn reviewer_cannot_take_two_slots() {
        let mut f = fixture(5);
        let id = f
            .engine
            .create_case(&f.creator, ContentId::new(7), 50, Round::GENESIS)
            .unwrap();
        let r1 = f.reviewers[0].clone();
        f.engine.assign_reviewer(&r1, id).unwrap();
        let err = f.engine.assign_reviewer(&r1, id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyAssigned);
        assert_eq!(f.engine.case(id).unwrap().reviewers.len(), 1);
    }

    #[test]
    fn full_case_rejects_more_reviewers() {
        let mut f = fixture(5);
        let id = open_full_case(&mut f, 7, 50);
        let sixth = f.reviewers[5].clone();
        let err = f.engine.assign_reviewer(&sixth, id).unwrap_err();
        assert_eq!(
            err,
            ReviewError::CapacityExceeded {
                case: id,
                capacity: 5
            }
        );
    }

    // ── Verdicts ────────────────────────────────────────────────────────

    #[test]
    fn only_assigned_reviewers_submit_once() {
        let mut f = fixture(5);
        let id = open_full_case(&mut f, 7, 50);
        let sixth = f.reviewers[5].clone();
        assert_eq!(
            f.engine.submit_verdict(&sixth, id, true).unwrap_err().kind(),
            ErrorKind::NotAssigned
        );

        let r1 = f.reviewers[0].clone();
        f.engine.submit_verdict(&r1, id, true).unwrap();
        assert_eq!(
            f.engine.submit_verdict(&r1, id, false).unwrap_err().kind(),
            ErrorKind::AlreadySubmitted
        );
        assert_eq!(f.engine.case(id).unwrap().verdicts.get(&r1), Some(&true));
    }

    #[test]
    fn history_tracks_submitted_verdicts_only() {
        let mut f = fixture(5);
        let id = open_full_case(&mut f, 7, 50);
        let r1 = f.reviewers[0].clone();
        let r2 = f.reviewers[1].clone();

        assert!(!f.engine.has_reviewed(&r1, ContentId::new(7)));
        f.engine.submit_verdict(&r1, id, false).unwrap();
        assert!(f.engine.has_reviewed(&r1, ContentId::new(7)));
        assert!(!f.engine.has_reviewed(&r1, ContentId::new(8)));
        // Assigned but silent reviewers have not reviewed yet.
        assert!(!f.engine.has_reviewed(&r2, ContentId::new(7)));
    }

    // ── Conclusion ──────────────────────────────────────────────────────

    #[test]
    fn four_to_one_passes_and_credits_majority() {
        let mut f = fixture(5);
        let id = open_full_case(&mut f, 7, 50);
        let reviewers = f.reviewers.clone();
        for r in &reviewers[..4] {
            f.engine.submit_verdict(r, id, true).unwrap();
        }
        f.engine.submit_verdict(&reviewers[4], id, false).unwrap();

        let outcome = f
            .engine
            .conclude(&acct("anyone"), id, &mut f.ledger)
            .unwrap();
        assert!(outcome);

        for r in &reviewers[..4] {
            assert_eq!(f.ledger.score_of(Namespace::Reviewer, r, Round::GENESIS), 50);
        }
        assert_eq!(
            f.ledger
                .score_of(Namespace::Reviewer, &reviewers[4], Round::GENESIS),
            0
        );
        assert_eq!(f.ledger.total_score(Namespace::Reviewer), 200);
        assert_eq!(
            f.ledger
                .lifetime_tally(Namespace::Reviewer, &reviewers[4])
                .unsuccessful,
            1
        );

        let case = f.engine.case(id).unwrap();
        assert_eq!(case.outcome, Some(true));
        assert_eq!(case.concluded_round, Some(Round::GENESIS));

        let events = f.engine.drain_events();
        match events.last() {
            Some(ReviewEvent::CaseConcluded {
                outcome, rewarded, ..
            }) => {
                assert!(*outcome);
                assert_eq!(rewarded.as_slice(), &reviewers[..4]);
            }
            other => panic!("expected CaseConcluded, got {other:?}"),
        }
    }

    #[test]
    fn tie_fails_and_credits_no_voters() {
        let mut f = fixture(4);
        let id = open_full_case(&mut f, 3, 10);
        let reviewers = f.reviewers.clone();
        f.engine.submit_verdict(&reviewers[0], id, true).unwrap();
        f.engine.submit_verdict(&reviewers[1], id, true).unwrap();
        f.engine.submit_verdict(&reviewers[2], id, false).unwrap();
        f.engine.submit_verdict(&reviewers[3], id, false).unwrap();

        assert!(!f.engine.conclude(&reviewers[0], id, &mut f.ledger).unwrap());
        // The two "false" voters matched the failing outcome.
        assert_eq!(f.ledger.total_score(Namespace::Reviewer), 20);
        assert_eq!(
            f.ledger
                .score_of(Namespace::Reviewer, &reviewers[0], Round::GENESIS),
            0
        );
    }

    #[test]
    fn conclude_requires_every_slot() {
        let mut f = fixture(5);
        let id = f
            .engine
            .create_case(&f.creator, ContentId::new(7), 50, Round::GENESIS)
            .unwrap();
        let r1 = f.reviewers[0].clone();
        f.engine.assign_reviewer(&r1, id).unwrap();
        f.engine.submit_verdict(&r1, id, true).unwrap();

        let err = f.engine.conclude(&r1, id, &mut f.ledger).unwrap_err();
        assert_eq!(
            err,
            ReviewError::Incomplete {
                case: id,
                submitted: 1,
                required: 5
            }
        );
        assert!(!f.engine.case(id).unwrap().is_concluded());
        assert_eq!(f.ledger.total_score(Namespace::Reviewer), 0);
    }

    #[test]
    fn concluded_case_is_immutable() {
        let mut f = fixture(1);
        let id = open_full_case(&mut f, 7, 5);
        let r1 = f.reviewers[0].clone();
        f.engine.submit_verdict(&r1, id, true).unwrap();
        f.engine.conclude(&r1, id, &mut f.ledger).unwrap();

        assert_eq!(
            f.engine.conclude(&r1, id, &mut f.ledger).unwrap_err().kind(),
            ErrorKind::AlreadyConcluded
        );
        assert_eq!(f.ledger.total_score(Namespace::Reviewer), 5);
    }

    // ── Governance ──────────────────────────────────────────────────────

    #[test]
    fn panel_size_change_applies_to_new_cases_only() {
        let mut f = fixture(5);
        let governor = acct("governor");
        f.gate.grant(&governor, Role::Governance);

        let before = f
            .engine
            .create_case(&f.creator, ContentId::new(1), 1, Round::GENESIS)
            .unwrap();
        assert_eq!(
            f.engine
                .set_required_reviewers(&f.creator, 3)
                .unwrap_err()
                .kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            f.engine
                .set_required_reviewers(&governor, 0)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidParameter
        );
        f.engine.set_required_reviewers(&governor, 3).unwrap();
        let after = f
            .engine
            .create_case(&f.creator, ContentId::new(2), 1, Round::GENESIS)
            .unwrap();

        assert_eq!(f.engine.case(before).unwrap().capacity, 5);
        assert_eq!(f.engine.case(after).unwrap().capacity, 3);
        assert!(f
            .engine
            .drain_events()
            .contains(&ReviewEvent::RequiredReviewersChanged { old: 5, new: 3 }));
    }

    #[test]
    fn rebuilt_engine_keeps_ids_and_history() {
        let mut f = fixture(1);
        let id = open_full_case(&mut f, 9, 5);
        let r1 = f.reviewers[0].clone();
        f.engine.submit_verdict(&r1, id, true).unwrap();

        let cases: Vec<ReviewCase> = f.engine.cases().cloned().collect();
        let mut rebuilt = ReviewEngine::from_cases(f.gate.clone(), 1, cases);
        assert!(rebuilt.has_reviewed(&r1, ContentId::new(9)));
        assert_eq!(rebuilt.cases_for_content(ContentId::new(9)), vec![id]);
        let next = rebuilt
            .create_case(&f.creator, ContentId::new(10), 1, Round::GENESIS)
            .unwrap();
        assert_eq!(next, id.next());
    }
}
