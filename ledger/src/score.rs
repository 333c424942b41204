//! Per-round point accumulation and lifetime accuracy tallies.

use crate::error::LedgerError;
use crate::round::RoundCounter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tribunal_access::AccessGate;
use tribunal_types::{AccountId, Namespace, Round};

/// Lifetime vote accuracy for a participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Votes that matched the final outcome.
    pub successful: u64,
    /// Votes that did not match the final outcome.
    pub unsuccessful: u64,
}

impl VoteTally {
    pub fn total(&self) -> u64 {
        self.successful + self.unsuccessful
    }
}

/// Accumulate-only score table keyed by (round, namespace, participant).
///
/// Written only by the review and arbitration engines; everything else is a
/// read-only query for the external payout process.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScoreLedger {
    rounds: RoundCounter,
    points: BTreeMap<(Round, Namespace, AccountId), u64>,
    tallies: BTreeMap<(Namespace, AccountId), VoteTally>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_round(&self) -> Round {
        self.rounds.current()
    }

    /// Treasury-gated round advance. See [`RoundCounter::advance`].
    pub fn advance_round(
        &mut self,
        gate: &dyn AccessGate,
        caller: &AccountId,
    ) -> Result<Round, LedgerError> {
        self.rounds.advance(gate, caller)
    }

    /// Add points for `participant` in the current round.
    pub fn credit(&mut self, namespace: Namespace, participant: &AccountId, points: u64) {
        let round = self.rounds.current();
        let entry = self
            .points
            .entry((round, namespace, participant.clone()))
            .or_default();
        *entry = entry.saturating_add(points);
        tracing::debug!(%namespace, %participant, %round, points, total = *entry, "points credited");
    }

    /// Record whether a participant's vote matched the final outcome.
    pub fn record_vote(&mut self, namespace: Namespace, participant: &AccountId, matched: bool) {
        let tally = self
            .tallies
            .entry((namespace, participant.clone()))
            .or_default();
        if matched {
            tally.successful += 1;
        } else {
            tally.unsuccessful += 1;
        }
    }

    /// Points held by `participant` in `round`.
    pub fn score_of(&self, namespace: Namespace, participant: &AccountId, round: Round) -> u64 {
        self.points
            .get(&(round, namespace, participant.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub fn lifetime_tally(&self, namespace: Namespace, participant: &AccountId) -> VoteTally {
        self.tallies
            .get(&(namespace, participant.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of all points in `namespace` for the current round.
    pub fn total_score(&self, namespace: Namespace) -> u64 {
        self.total_score_at(namespace, self.rounds.current())
    }

    pub fn total_score_at(&self, namespace: Namespace, round: Round) -> u64 {
        self.round_entries(namespace, round)
            .fold(0u64, |acc, (_, points)| acc.saturating_add(points))
    }

    /// Every participant with points in `namespace` for `round`, ordered by account.
    pub fn participants(&self, namespace: Namespace, round: Round) -> Vec<(AccountId, u64)> {
        self.round_entries(namespace, round)
            .map(|(account, points)| (account.clone(), points))
            .collect()
    }

    fn round_entries(
        &self,
        namespace: Namespace,
        round: Round,
    ) -> impl Iterator<Item = (&AccountId, u64)> {
        self.points
            .range((round, namespace, AccountId::new(""))..)
            .take_while(move |((r, ns, _), _)| *r == round && *ns == namespace)
            .map(|((_, _, account), points)| (account, *points))
    }
}
