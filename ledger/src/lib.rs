//! Score ledger for reviewers and jurors.
//!
//! Points are bucketed by the round in which a case concluded so historical
//! rounds stay queryable after the treasury advances the counter. Reviewer and
//! juror points live in independent namespaces. Lifetime vote tallies
//! (matched / did not match the final outcome) are kept per namespace and are
//! independent of rounds.

pub mod error;
pub mod round;
pub mod score;

pub use error::LedgerError;
pub use round::RoundCounter;
pub use score::{ScoreLedger, VoteTally};
