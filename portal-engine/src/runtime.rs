//! Virtual-time host for the controller, used by the CLI and tests.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use portal_core::{Toast, ToastId};

use crate::controller::{Deferred, Outcome, PortalController, UiEffect};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTask {
    due_ms: u64,
    seq: u64,
    task: Deferred,
}

impl Ord for PendingTask {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the heap pops the earliest task first; ties keep scheduling order.
        (other.due_ms, other.seq).cmp(&(self.due_ms, self.seq))
    }
}

impl PartialOrd for PendingTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A toast as first seen by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct RaisedToast {
    pub at_ms: u64,
    pub toast: Toast,
}

/// Runs deferred tasks on a manually advanced clock.
#[derive(Debug)]
pub struct VirtualRuntime {
    controller: PortalController,
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<PendingTask>,
    effects: Vec<UiEffect>,
    raised: Vec<RaisedToast>,
    seen: HashSet<ToastId>,
}

impl VirtualRuntime {
    pub fn new(controller: PortalController) -> Self {
        Self {
            controller,
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
            effects: Vec::new(),
            raised: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn controller(&self) -> &PortalController {
        &self.controller
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of tasks still waiting on the clock.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Every UI effect requested so far, in order.
    pub fn effects(&self) -> &[UiEffect] {
        &self.effects
    }

    /// Every toast raised so far, including those already removed.
    pub fn raised_toasts(&self) -> &[RaisedToast] {
        &self.raised
    }

    /// Run one controller operation at the current instant.
    pub fn dispatch<F>(&mut self, operation: F)
    where
        F: FnOnce(&mut PortalController) -> Outcome,
    {
        let outcome = operation(&mut self.controller);
        self.apply(outcome);
    }

    /// Move the clock forward, running every task that falls due on the way.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms + ms;
        while let Some(next) = self.queue.peek() {
            if next.due_ms > target {
                break;
            }
            let Some(pending) = self.queue.pop() else {
                break;
            };
            self.now_ms = pending.due_ms;
            let outcome = self.controller.resolve(pending.task);
            self.apply(outcome);
        }
        self.now_ms = target;
    }

    /// Advance until no task is left.
    pub fn run_until_idle(&mut self) {
        while let Some(due) = self.queue.peek().map(|task| task.due_ms) {
            self.advance(due.saturating_sub(self.now_ms));
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        for scheduled in outcome.scheduled {
            self.queue.push(PendingTask {
                due_ms: self.now_ms + u64::from(scheduled.after_ms),
                seq: self.next_seq,
                task: scheduled.task,
            });
            self.next_seq += 1;
        }
        self.effects.extend(outcome.effects);

        for toast in self.controller.toasts() {
            if self.seen.insert(toast.id) {
                self.raised.push(RaisedToast {
                    at_ms: self.now_ms,
                    toast: toast.clone(),
                });
            }
        }
    }
}
