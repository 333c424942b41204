//! The tribunal coordinator.
//!
//! Owns the review engine, the arbitration engine and the score ledger behind a
//! single `RwLock`. Every mutating operation holds the write lock for its whole
//! check-then-act sequence, so capacity limits and the one-active-dispute rule
//! are never observed half-applied. Queries take the read lock and may run
//! concurrently with each other.
//!
//! Events are staged on the [`EventBus`] before the write lock is released
//! and delivered to listeners after it, so listeners may call back into the
//! coordinator.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tracing::warn;
use tribunal_access::{AccessGate, ContentDirectory};
use tribunal_arbitration::{ArbitrationEngine, DisputeCase, DisputeRequest, Submission};
use tribunal_ledger::{ScoreLedger, VoteTally};
use tribunal_review::{ReviewCase, ReviewEngine, ReviewHistory};
use tribunal_types::{AccountId, CaseId, ContentId, Namespace, Round, TribunalParams};

use crate::config::TribunalConfig;
use crate::event::{EventBus, Listener, TribunalEvent, DEFAULT_EVENT_LOG_CAPACITY};
use crate::snapshot::{TribunalSnapshot, SNAPSHOT_VERSION};
use crate::NodeError;

struct State {
    reviews: ReviewEngine,
    disputes: ArbitrationEngine,
    ledger: ScoreLedger,
    /// Coordinator-level events (round changes) awaiting publication.
    queued: Vec<TribunalEvent>,
}

impl State {
    fn new(reviews: ReviewEngine, disputes: ArbitrationEngine, ledger: ScoreLedger) -> Self {
        Self {
            reviews,
            disputes,
            ledger,
            queued: Vec::new(),
        }
    }

    /// Everything the last operation queued, in emission order.
    fn take_events(&mut self) -> Vec<TribunalEvent> {
        let review_events = self.reviews.drain_events().into_iter().map(TribunalEvent::from);
        let dispute_events = self
            .disputes
            .drain_events()
            .into_iter()
            .map(TribunalEvent::from);
        let queued = std::mem::take(&mut self.queued);
        review_events.chain(dispute_events).chain(queued).collect()
    }

    fn params(&self) -> TribunalParams {
        TribunalParams {
            required_reviewers: self.reviews.required_reviewers(),
            required_jurors: self.disputes.required_jurors(),
        }
    }
}

pub struct Tribunal {
    state: RwLock<State>,
    bus: EventBus,
    /// Consulted directly only for treasury checks; the engines hold their own handle.
    gate: Arc<dyn AccessGate>,
}

impl Tribunal {
    pub fn new(
        params: TribunalParams,
        gate: Arc<dyn AccessGate>,
        directory: Arc<dyn ContentDirectory>,
    ) -> Self {
        Self::build(params, gate, directory, DEFAULT_EVENT_LOG_CAPACITY)
    }

    fn build(
        params: TribunalParams,
        gate: Arc<dyn AccessGate>,
        directory: Arc<dyn ContentDirectory>,
        event_log_capacity: usize,
    ) -> Self {
        let state = State::new(
            ReviewEngine::new(gate.clone(), params.required_reviewers),
            ArbitrationEngine::new(gate.clone(), directory, params.required_jurors),
            ScoreLedger::new(),
        );
        Self::with_state(state, gate, EventBus::with_log_capacity(event_log_capacity))
    }

    pub fn from_config(
        config: &TribunalConfig,
        gate: Arc<dyn AccessGate>,
        directory: Arc<dyn ContentDirectory>,
    ) -> Result<Self, NodeError> {
        config.validate()?;
        Ok(Self::build(
            config.params(),
            gate,
            directory,
            config.event_log_capacity,
        ))
    }

    /// Rebuild a coordinator from a verified snapshot.
    pub fn restore(
        snapshot: TribunalSnapshot,
        gate: Arc<dyn AccessGate>,
        directory: Arc<dyn ContentDirectory>,
    ) -> Result<Self, NodeError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(NodeError::Snapshot(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        if !snapshot.verify() {
            return Err(NodeError::Snapshot("snapshot hash mismatch".into()));
        }
        let params = snapshot.params;
        let state = State::new(
            ReviewEngine::from_cases(gate.clone(), params.required_reviewers, snapshot.review_cases),
            ArbitrationEngine::from_cases(
                gate.clone(),
                directory,
                params.required_jurors,
                snapshot.dispute_cases,
            ),
            snapshot.ledger,
        );
        Ok(Self::with_state(state, gate, EventBus::new()))
    }

    fn with_state(state: State, gate: Arc<dyn AccessGate>, bus: EventBus) -> Self {
        Self {
            state: RwLock::new(state),
            bus,
            gate,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `op` under the write lock, then deliver whatever it queued.
    ///
    /// Engines validate before mutating, so a failed `op` leaves nothing queued.
    fn write<T>(
        &self,
        op: impl FnOnce(&mut State) -> Result<T, NodeError>,
    ) -> Result<T, NodeError> {
        let result = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let result = op(&mut *state);
            self.bus.stage(state.take_events());
            result
        };
        if let Err(e) = &result {
            warn!(kind = %e.kind(), error = %e, "operation rejected");
        }
        self.bus.flush();
        result
    }

    // ── Review ─────────────────────────────────────────────────────────

    pub fn create_review_case(
        &self,
        caller: &AccountId,
        content_id: ContentId,
        score_weight: u64,
    ) -> Result<CaseId, NodeError> {
        self.write(|s| {
            let now = s.ledger.current_round();
            Ok(s.reviews.create_case(caller, content_id, score_weight, now)?)
        })
    }

    pub fn assign_reviewer(&self, caller: &AccountId, case_id: CaseId) -> Result<(), NodeError> {
        self.write(|s| Ok(s.reviews.assign_reviewer(caller, case_id)?))
    }

    pub fn submit_review_verdict(
        &self,
        caller: &AccountId,
        case_id: CaseId,
        value: bool,
    ) -> Result<(), NodeError> {
        self.write(|s| Ok(s.reviews.submit_verdict(caller, case_id, value)?))
    }

    /// Conclude a fully-voted review case. Returns the outcome.
    pub fn conclude_review_case(
        &self,
        caller: &AccountId,
        case_id: CaseId,
    ) -> Result<bool, NodeError> {
        self.write(|s| Ok(s.reviews.conclude(caller, case_id, &mut s.ledger)?))
    }

    pub fn set_required_reviewers(
        &self,
        caller: &AccountId,
        required: u32,
    ) -> Result<(), NodeError> {
        self.write(|s| Ok(s.reviews.set_required_reviewers(caller, required)?))
    }

    // ── Arbitration ────────────────────────────────────────────────────

    pub fn create_dispute_case(
        &self,
        caller: &AccountId,
        request: DisputeRequest,
    ) -> Result<CaseId, NodeError> {
        self.write(|s| {
            let now = s.ledger.current_round();
            Ok(s.disputes.create_case(caller, request, now)?)
        })
    }

    pub fn assign_juror(&self, caller: &AccountId, case_id: CaseId) -> Result<(), NodeError> {
        self.write(|s| Ok(s.disputes.assign_juror(caller, case_id, &s.reviews)?))
    }

    pub fn submit_dispute_verdict(
        &self,
        caller: &AccountId,
        case_id: CaseId,
        value: bool,
    ) -> Result<Submission, NodeError> {
        self.write(|s| {
            Ok(s.disputes
                .submit_verdict(caller, case_id, value, &mut s.ledger)?)
        })
    }

    pub fn set_required_jurors(&self, caller: &AccountId, required: u32) -> Result<(), NodeError> {
        self.write(|s| Ok(s.disputes.set_required_jurors(caller, required)?))
    }

    // ── Rounds ─────────────────────────────────────────────────────────

    /// Treasury-only. Returns the new round.
    pub fn advance_round(&self, caller: &AccountId) -> Result<Round, NodeError> {
        self.write(|s| {
            let round = s.ledger.advance_round(self.gate.as_ref(), caller)?;
            s.queued.push(TribunalEvent::RoundAdvanced { round });
            Ok(round)
        })
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn current_round(&self) -> Round {
        self.read().ledger.current_round()
    }

    pub fn params(&self) -> TribunalParams {
        self.read().params()
    }

    pub fn score_of(&self, namespace: Namespace, participant: &AccountId, round: Round) -> u64 {
        self.read().ledger.score_of(namespace, participant, round)
    }

    pub fn lifetime_tally(&self, namespace: Namespace, participant: &AccountId) -> VoteTally {
        self.read().ledger.lifetime_tally(namespace, participant)
    }

    /// Sum of `namespace` points in the current round.
    pub fn total_score(&self, namespace: Namespace) -> u64 {
        self.read().ledger.total_score(namespace)
    }

    pub fn total_score_at(&self, namespace: Namespace, round: Round) -> u64 {
        self.read().ledger.total_score_at(namespace, round)
    }

    pub fn participants(&self, namespace: Namespace, round: Round) -> Vec<(AccountId, u64)> {
        self.read().ledger.participants(namespace, round)
    }

    pub fn review_case(&self, case_id: CaseId) -> Option<ReviewCase> {
        self.read().reviews.case(case_id).cloned()
    }

    pub fn review_case_count(&self) -> usize {
        self.read().reviews.case_count()
    }

    pub fn cases_for_content(&self, content: ContentId) -> Vec<CaseId> {
        self.read().reviews.cases_for_content(content)
    }

    pub fn has_reviewed(&self, account: &AccountId, content: ContentId) -> bool {
        self.read().reviews.has_reviewed(account, content)
    }

    pub fn dispute_case(&self, case_id: CaseId) -> Option<DisputeCase> {
        self.read().disputes.case(case_id).cloned()
    }

    pub fn dispute_case_count(&self) -> usize {
        self.read().disputes.case_count()
    }

    pub fn active_dispute(&self, juror: &AccountId) -> Option<CaseId> {
        self.read().disputes.active_dispute(juror)
    }

    // ── Events and export ──────────────────────────────────────────────

    /// Register a listener invoked for every event, in commit order.
    ///
    /// Listeners run after the operation's lock is released and may call back
    /// into the coordinator.
    pub fn subscribe(&self, listener: Listener) {
        self.bus.subscribe(listener);
    }

    /// Take the retained events published since the last drain, oldest first.
    ///
    /// At most `event_log_capacity` events are retained; older ones are dropped.
    pub fn drain_events(&self) -> Vec<TribunalEvent> {
        self.bus.drain_log()
    }

    pub fn snapshot(&self) -> Result<TribunalSnapshot, NodeError> {
        let state = self.read();
        TribunalSnapshot::create(
            state.params(),
            state.reviews.cases().cloned().collect(),
            state.disputes.cases().cloned().collect(),
            state.ledger.clone(),
        )
    }
}
