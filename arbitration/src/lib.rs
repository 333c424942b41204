//! Dispute arbitration.
//!
//! Jurors take one dispute at a time. A dispute concludes as soon as one
//! verdict holds a strict majority of the panel's seats; jurors who vote after
//! that are recorded as late verdicts, counted toward their lifetime accuracy
//! but never toward round points.
//!
//! Content-related disputes exclude the content's instructor and anyone who
//! has already reviewed the content.

pub mod case;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod events;

pub use case::{DisputeCase, DisputeRequest};
pub use conflict::ConflictReason;
pub use engine::{ArbitrationEngine, Submission, JUROR_POINTS};
pub use error::ArbitrationError;
pub use events::ArbitrationEvent;
