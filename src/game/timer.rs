use std::time::{Duration, Instant};

use tracing::trace;

use crate::game::state::{GameEvent, RunState};

/// The state a deferred task expects to find when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub state: RunState,
    pub epoch: u64,
}

#[derive(Debug, Clone)]
struct Deferred {
    due: Instant,
    expect: Snapshot,
    event: GameEvent,
}

/// Fire-once real-time tasks. Nothing is ever cancelled: a task whose
/// snapshot no longer matches when it comes due is dropped instead.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, expect: Snapshot, event: GameEvent) {
        self.pending.push(Deferred { due: now + delay, expect, event });
    }

    /// Removes every task due at `now` and returns the events still valid for `current`.
    pub fn fire_due(&mut self, now: Instant, current: Snapshot) -> Vec<GameEvent> {
        let (due, pending): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|task| task.due <= now);
        self.pending = pending;

        due.into_iter()
            .filter_map(|task| {
                if task.expect == current {
                    Some(task.event)
                } else {
                    trace!("dropping stale {:?}, expected {:?} found {:?}", task.event, task.expect, current);
                    None
                }
            })
            .collect()
    }
}
