//! Tribunal snapshots: the logical persisted state at a point in time.
//!
//! A snapshot carries both case tables, the score ledger (including the round
//! counter) and the governable parameters. The juror reverse index is not
//! stored; it is derived from the dispute table on restore. The hash is
//! computed deterministically from the contents so a consumer can detect a
//! corrupted or tampered export.

use serde::{Deserialize, Serialize};

use tribunal_arbitration::DisputeCase;
use tribunal_ledger::ScoreLedger;
use tribunal_review::ReviewCase;
use tribunal_types::TribunalParams;

use crate::NodeError;

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TribunalSnapshot {
    /// Blake2b-256 of the serialized contents.
    pub hash: [u8; 32],
    /// Snapshot version for compatibility.
    pub version: u32,
    pub params: TribunalParams,
    pub review_cases: Vec<ReviewCase>,
    pub dispute_cases: Vec<DisputeCase>,
    pub ledger: ScoreLedger,
}

impl TribunalSnapshot {
    pub fn create(
        params: TribunalParams,
        review_cases: Vec<ReviewCase>,
        dispute_cases: Vec<DisputeCase>,
        ledger: ScoreLedger,
    ) -> Result<Self, NodeError> {
        let mut snap = Self {
            hash: [0u8; 32],
            version: SNAPSHOT_VERSION,
            params,
            review_cases,
            dispute_cases,
            ledger,
        };
        snap.hash = snap.compute_hash()?;
        Ok(snap)
    }

    fn compute_hash(&self) -> Result<[u8; 32], NodeError> {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let body = bincode::serialize(&(
            self.version,
            &self.params,
            &self.review_cases,
            &self.dispute_cases,
            &self.ledger,
        ))
        .map_err(|e| NodeError::Snapshot(e.to_string()))?;

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(&body);
        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        Ok(out)
    }

    /// Verify the snapshot hash matches its contents.
    pub fn verify(&self) -> bool {
        self.compute_hash().is_ok_and(|h| h == self.hash)
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, NodeError> {
        bincode::serialize(self).map_err(|e| NodeError::Snapshot(e.to_string()))
    }

    /// Deserialize a snapshot from bytes and check its integrity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NodeError> {
        let snap: Self =
            bincode::deserialize(bytes).map_err(|e| NodeError::Snapshot(e.to_string()))?;
        if snap.version != SNAPSHOT_VERSION {
            return Err(NodeError::Snapshot(format!(
                "unsupported snapshot version {}",
                snap.version
            )));
        }
        if !snap.verify() {
            return Err(NodeError::Snapshot("snapshot hash mismatch".into()));
        }
        Ok(snap)
    }
}
