//! Arbitration engine: owns the dispute case table and the juror reverse
//! index, and applies the early-majority termination policy.

use crate::case::{DisputeCase, DisputeRequest};
use crate::conflict::check_conflict;
use crate::error::ArbitrationError;
use crate::events::ArbitrationEvent;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};
use tribunal_access::{require_member, require_role, AccessGate, ContentDirectory};
use tribunal_ledger::ScoreLedger;
use tribunal_review::ReviewHistory;
use tribunal_types::{AccountId, CaseId, Namespace, Role, Round};

/// Round points earned by each juror who voted with the outcome.
pub const JUROR_POINTS: u64 = 1;

/// What happened to a submitted dispute verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Recorded; no majority yet.
    Recorded,
    /// This verdict produced the deciding majority.
    Concluded { outcome: bool },
    /// The case had already concluded; bookkept as a late verdict.
    Late { outcome: bool },
}

pub struct ArbitrationEngine {
    gate: Arc<dyn AccessGate>,
    directory: Arc<dyn ContentDirectory>,
    cases: BTreeMap<CaseId, DisputeCase>,
    next_id: CaseId,
    required_jurors: u32,
    /// Reverse index: juror -> the one case they still owe a verdict on.
    active: HashMap<AccountId, CaseId>,
    pending_events: Vec<ArbitrationEvent>,
}

impl ArbitrationEngine {
    pub fn new(
        gate: Arc<dyn AccessGate>,
        directory: Arc<dyn ContentDirectory>,
        required_jurors: u32,
    ) -> Self {
        Self {
            gate,
            directory,
            cases: BTreeMap::new(),
            next_id: CaseId::FIRST,
            required_jurors,
            active: HashMap::new(),
            pending_events: Vec::new(),
        }
    }

    /// Rebuild an engine from an exported case table.
    ///
    /// The reverse index is derived: a juror is active on a case when seated
    /// there without having voted.
    pub fn from_cases(
        gate: Arc<dyn AccessGate>,
        directory: Arc<dyn ContentDirectory>,
        required_jurors: u32,
        cases: Vec<DisputeCase>,
    ) -> Self {
        let mut engine = Self::new(gate, directory, required_jurors);
        for case in cases {
            for juror in case.pending_jurors() {
                engine.active.insert(juror.clone(), case.id);
            }
            if case.id >= engine.next_id {
                engine.next_id = case.id.next();
            }
            engine.cases.insert(case.id, case);
        }
        engine
    }

    /// Open a dispute. Requires [`Role::DisputeCreator`].
    pub fn create_case(
        &mut self,
        caller: &AccountId,
        request: DisputeRequest,
        now: Round,
    ) -> Result<CaseId, ArbitrationError> {
        require_role(self.gate.as_ref(), caller, Role::DisputeCreator)?;
        if request.content_related && request.content_id.is_none() {
            return Err(ArbitrationError::MissingContentId);
        }

        let id = self.next_id;
        self.next_id = id.next();
        let case = DisputeCase::new(id, request, self.required_jurors, now);

        info!(
            case_id = %id,
            scope = case.scope,
            content_related = case.content_related,
            %caller,
            "dispute case created"
        );
        self.pending_events.push(ArbitrationEvent::CaseCreated {
            case_id: id,
            scope: case.scope,
            content_id: case.content_id,
        });
        self.cases.insert(id, case);
        Ok(id)
    }

    /// Seat the caller as a juror on `case_id`.
    ///
    /// `history` answers the prior-reviewer half of the conflict rule.
    pub fn assign_juror(
        &mut self,
        caller: &AccountId,
        case_id: CaseId,
        history: &dyn ReviewHistory,
    ) -> Result<(), ArbitrationError> {
        require_member(self.gate.as_ref(), caller, Role::Juror)?;

        let case = self
            .cases
            .get_mut(&case_id)
            .ok_or(ArbitrationError::NotFound(case_id))?;
        if case.is_juror(caller) {
            return Err(ArbitrationError::AlreadyAssigned {
                case: case_id,
                account: caller.clone(),
            });
        }
        if let Some(&active) = self.active.get(caller) {
            return Err(ArbitrationError::AlreadyAssignedElsewhere {
                account: caller.clone(),
                active,
            });
        }
        if case.is_full() {
            return Err(ArbitrationError::CapacityExceeded {
                case: case_id,
                capacity: case.capacity,
            });
        }
        // Late verdicts belong to jurors seated before the majority formed.
        if case.is_concluded() {
            return Err(ArbitrationError::AlreadyConcluded(case_id));
        }
        if case.content_related {
            let content = case.content_id.ok_or(ArbitrationError::MissingContentId)?;
            check_conflict(self.directory.as_ref(), history, case_id, content, caller)?;
        }

        case.jurors.push(caller.clone());
        self.active.insert(caller.clone(), case_id);
        debug!(%case_id, juror = %caller, seats = case.jurors.len(), "juror assigned");
        self.pending_events.push(ArbitrationEvent::JurorAssigned {
            case_id,
            juror: caller.clone(),
        });
        Ok(())
    }

    /// Record the caller's verdict and release them for a new case.
    ///
    /// Concludes the case as soon as one value holds more than half the seats.
    /// Verdicts arriving after that only update the juror's lifetime tally.
    pub fn submit_verdict(
        &mut self,
        caller: &AccountId,
        case_id: CaseId,
        value: bool,
        ledger: &mut ScoreLedger,
    ) -> Result<Submission, ArbitrationError> {
        let case = self
            .cases
            .get_mut(&case_id)
            .ok_or(ArbitrationError::NotFound(case_id))?;
        if !case.is_juror(caller) {
            return Err(ArbitrationError::NotAssigned {
                case: case_id,
                account: caller.clone(),
            });
        }
        if case.has_submitted(caller) {
            return Err(ArbitrationError::AlreadySubmitted {
                case: case_id,
                account: caller.clone(),
            });
        }

        self.active.remove(caller);

        if let Some(outcome) = case.outcome {
            let matched = value == outcome;
            case.late_verdicts.insert(caller.clone(), value);
            ledger.record_vote(Namespace::Juror, caller, matched);
            debug!(%case_id, juror = %caller, value, matched, "late dispute verdict recorded");
            self.pending_events
                .push(ArbitrationEvent::LateVerdictRecorded {
                    case_id,
                    juror: caller.clone(),
                    value,
                    matched,
                });
            return Ok(Submission::Late { outcome });
        }

        case.verdicts.insert(caller.clone(), value);
        debug!(%case_id, juror = %caller, value, "dispute verdict submitted");
        self.pending_events.push(ArbitrationEvent::VerdictSubmitted {
            case_id,
            juror: caller.clone(),
            value,
        });

        let Some(outcome) = case.count().decisive(case.capacity) else {
            return Ok(Submission::Recorded);
        };

        let round = ledger.current_round();
        case.outcome = Some(outcome);
        case.concluded_round = Some(round);

        let mut rewarded = Vec::new();
        for juror in &case.jurors {
            let Some(&vote) = case.verdicts.get(juror) else {
                continue;
            };
            let matched = vote == outcome;
            if matched {
                ledger.credit(Namespace::Juror, juror, JUROR_POINTS);
                rewarded.push(juror.clone());
            }
            ledger.record_vote(Namespace::Juror, juror, matched);
        }

        info!(
            %case_id,
            outcome,
            %round,
            votes = case.verdicts.len(),
            seats = case.capacity,
            "dispute case concluded"
        );
        self.pending_events.push(ArbitrationEvent::CaseConcluded {
            case_id,
            outcome,
            round,
            rewarded,
        });
        Ok(Submission::Concluded { outcome })
    }

    /// Change the juror panel size for disputes opened from now on.
    pub fn set_required_jurors(
        &mut self,
        caller: &AccountId,
        required: u32,
    ) -> Result<(), ArbitrationError> {
        require_role(self.gate.as_ref(), caller, Role::Governance)?;
        if required == 0 {
            return Err(ArbitrationError::InvalidParameter(
                "required jurors must be at least 1".into(),
            ));
        }
        let old = std::mem::replace(&mut self.required_jurors, required);
        info!(old, new = required, %caller, "required jurors changed");
        self.pending_events
            .push(ArbitrationEvent::RequiredJurorsChanged { old, new: required });
        Ok(())
    }

    pub fn required_jurors(&self) -> u32 {
        self.required_jurors
    }

    pub fn case(&self, case_id: CaseId) -> Option<&DisputeCase> {
        self.cases.get(&case_id)
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    pub fn cases(&self) -> impl Iterator<Item = &DisputeCase> {
        self.cases.values()
    }

    /// The case `juror` currently owes a verdict on, if any.
    pub fn active_dispute(&self, juror: &AccountId) -> Option<CaseId> {
        self.active.get(juror).copied()
    }

    pub fn drain_events(&mut self) -> Vec<ArbitrationEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
