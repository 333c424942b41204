//! Content-quality review.
//!
//! Reviewers (validators) take slots on a review case for a content asset and
//! submit a pass/fail verdict. Once every slot has submitted, anyone may
//! conclude the case: the majority verdict becomes the outcome (ties fail) and
//! each reviewer who voted with the majority earns the case's score weight in
//! the current round.
//!
//! The engine also answers "did this account review that content?" for the
//! arbitration conflict-of-interest rules via [`ReviewHistory`].

pub mod case;
pub mod engine;
pub mod error;
pub mod events;
pub mod tally;

pub use case::ReviewCase;
pub use engine::{ReviewEngine, ReviewHistory};
pub use error::ReviewError;
pub use events::ReviewEvent;
pub use tally::VoteCount;
