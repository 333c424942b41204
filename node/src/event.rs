//! Notifications published by the coordinator, and the bus that fans them out.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, TryLockError};

use tribunal_arbitration::ArbitrationEvent;
use tribunal_review::ReviewEvent;
use tribunal_types::{AccountId, CaseId, ContentId, ParamKind, Round};

/// Every observable side effect of a successful operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TribunalEvent {
    ReviewCaseCreated {
        case_id: CaseId,
        content_id: ContentId,
        score_weight: u64,
    },
    ReviewerAssigned {
        case_id: CaseId,
        reviewer: AccountId,
    },
    ReviewVerdictSubmitted {
        case_id: CaseId,
        reviewer: AccountId,
        value: bool,
    },
    ReviewCaseConcluded {
        case_id: CaseId,
        content_id: ContentId,
        outcome: bool,
        round: Round,
        rewarded: Vec<AccountId>,
    },
    DisputeCaseCreated {
        case_id: CaseId,
        scope: u8,
        content_id: Option<ContentId>,
    },
    JurorAssigned {
        case_id: CaseId,
        juror: AccountId,
    },
    DisputeVerdictSubmitted {
        case_id: CaseId,
        juror: AccountId,
        value: bool,
    },
    DisputeCaseConcluded {
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
    RoundAdvanced {
        round: Round,
    },
    ParameterChanged {
        param: ParamKind,
        old: u32,
        new: u32,
    },
}

impl From<ReviewEvent> for TribunalEvent {
    fn from(event: ReviewEvent) -> Self {
        match event {
            ReviewEvent::CaseCreated {
                case_id,
                content_id,
                score_weight,
            } => Self::ReviewCaseCreated {
                case_id,
                content_id,
                score_weight,
            },
            ReviewEvent::ReviewerAssigned { case_id, reviewer } => {
                Self::ReviewerAssigned { case_id, reviewer }
            }
            ReviewEvent::VerdictSubmitted {
                case_id,
                reviewer,
                value,
            } => Self::ReviewVerdictSubmitted {
                case_id,
                reviewer,
                value,
            },
            ReviewEvent::CaseConcluded {
                case_id,
                content_id,
                outcome,
                round,
                rewarded,
            } => Self::ReviewCaseConcluded {
                case_id,
                content_id,
                outcome,
                round,
                rewarded,
            },
            ReviewEvent::RequiredReviewersChanged { old, new } => Self::ParameterChanged {
                param: ParamKind::RequiredReviewers,
                old,
                new,
            },
        }
    }
}

impl From<ArbitrationEvent> for TribunalEvent {
    fn from(event: ArbitrationEvent) -> Self {
        match event {
            ArbitrationEvent::CaseCreated {
                case_id,
                scope,
                content_id,
            } => Self::DisputeCaseCreated {
                case_id,
                scope,
                content_id,
            },
            ArbitrationEvent::JurorAssigned { case_id, juror } => {
                Self::JurorAssigned { case_id, juror }
            }
            ArbitrationEvent::VerdictSubmitted {
                case_id,
                juror,
                value,
            } => Self::DisputeVerdictSubmitted {
                case_id,
                juror,
                value,
            },
            ArbitrationEvent::CaseConcluded {
                case_id,
                outcome,
                round,
                rewarded,
            } => Self::DisputeCaseConcluded {
                case_id,
                outcome,
                round,
                rewarded,
            },
            ArbitrationEvent::LateVerdictRecorded {
                case_id,
                juror,
                value,
                matched,
            } => Self::LateVerdictRecorded {
                case_id,
                juror,
                value,
                matched,
            },
            ArbitrationEvent::RequiredJurorsChanged { old, new } => Self::ParameterChanged {
                param: ParamKind::RequiredJurors,
                old,
                new,
            },
        }
    }
}

/// Events kept for [`EventBus::drain_log`] when no capacity is configured.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 1024;

pub type Listener = Box<dyn Fn(&TribunalEvent) + Send + Sync>;

/// Ordered fan-out of committed events.
///
/// Delivery is split in two. [`stage`](Self::stage) runs while the committing
/// operation still holds the coordinator's state lock, so staging order is
/// commit order. [`flush`](Self::flush) runs after that lock is released and
/// hands staged events to listeners one at a time, from whichever thread wins
/// the delivery flag. Listeners may therefore query the coordinator, submit
/// further operations or subscribe more listeners without deadlocking.
///
/// The most recent `log_capacity` events are also kept for callers that poll
/// instead of subscribing. A capacity of zero disables the log.
pub struct EventBus {
    listeners: RwLock<Vec<Arc<dyn Fn(&TribunalEvent) + Send + Sync>>>,
    outbox: Mutex<VecDeque<TribunalEvent>>,
    log: Mutex<VecDeque<TribunalEvent>>,
    log_capacity: usize,
    delivering: Mutex<()>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_log_capacity(DEFAULT_EVENT_LOG_CAPACITY)
    }

    pub fn with_log_capacity(log_capacity: usize) -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            outbox: Mutex::new(VecDeque::new()),
            log: Mutex::new(VecDeque::with_capacity(log_capacity.min(DEFAULT_EVENT_LOG_CAPACITY))),
            log_capacity,
            delivering: Mutex::new(()),
        }
    }

    pub fn subscribe(&self, listener: Listener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::from(listener));
    }

    /// Queue committed events for delivery and record them in the log.
    pub fn stage(&self, events: impl IntoIterator<Item = TribunalEvent>) {
        let mut outbox = lock(&self.outbox);
        let mut log = lock(&self.log);
        for event in events {
            if self.log_capacity > 0 {
                if log.len() == self.log_capacity {
                    log.pop_front();
                }
                log.push_back(event.clone());
            }
            outbox.push_back(event);
        }
    }

    /// Deliver every staged event to the listeners, in staging order.
    ///
    /// Returns immediately if another call is already delivering; that call
    /// picks up anything staged in the meantime.
    pub fn flush(&self) {
        loop {
            let guard = match self.delivering.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => return,
            };
            while let Some(event) = self.next_staged() {
                let listeners = self
                    .listeners
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                for listener in &listeners {
                    listener(&event);
                }
            }
            drop(guard);
            // Staged between our last pop and releasing the flag.
            if lock(&self.outbox).is_empty() {
                return;
            }
        }
    }

    /// Take every logged event, oldest first.
    pub fn drain_log(&self) -> Vec<TribunalEvent> {
        lock(&self.log).drain(..).collect()
    }

    fn next_staged(&self) -> Option<TribunalEvent> {
        lock(&self.outbox).pop_front()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
