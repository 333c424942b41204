//! Vote counting shared by reviews and disputes.

use serde::{Deserialize, Serialize};

/// Running yes/no count of submitted verdicts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    pub yes: u32,
    pub no: u32,
}

impl VoteCount {
    pub fn from_values(values: impl IntoIterator<Item = bool>) -> Self {
        let mut count = Self::default();
        for value in values {
            count.add(value);
        }
        count
    }

    pub fn add(&mut self, value: bool) {
        if value {
            self.yes += 1;
        } else {
            self.no += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.yes + self.no
    }

    /// Simple majority of the submitted votes. A tie is not a passing majority.
    pub fn majority(&self) -> bool {
        self.yes > self.no
    }

    /// The value whose count strictly exceeds half of `seats`, if any.
    ///
    /// Used for early conclusion: once this returns `Some`, no outstanding
    /// votes can change the result.
    pub fn decisive(&self, seats: u32) -> Option<bool> {
        let seats = u64::from(seats);
        if u64::from(self.yes) * 2 > seats {
            Some(true)
        } else if u64::from(self.no) * 2 > seats {
            Some(false)
        } else {
            None
        }
    }
}
