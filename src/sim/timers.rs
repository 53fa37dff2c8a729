//! Tick-counted deferred actions
//!
//! Delayed work is stamped with the run it belongs to. When a run or day is
//! replaced, the stamp no longer matches and the action is dropped unseen.

use serde::{Deserialize, Serialize};

/// Work to perform once its delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Switch off a radio's distraction flag
    ClearDistraction { furniture: usize },
    /// Leave the capture cutscene and start the next day
    AdvanceDay,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: u64,
    run_id: u32,
    action: DeferredAction,
}

/// Pending actions, kept in scheduling order
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    entries: Vec<Scheduled>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, due: u64, run_id: u32, action: DeferredAction) {
        self.entries.push(Scheduled {
            due,
            run_id,
            action,
        });
    }

    /// Remove everything due at `now`, returning the actions still relevant to `run_id`
    pub fn take_due(&mut self, now: u64, run_id: u32) -> Vec<DeferredAction> {
        let mut ready = Vec::new();
        self.entries.retain(|e| {
            if e.due > now {
                return true;
            }
            if e.run_id == run_id {
                ready.push(e.action);
            } else {
                log::debug!("Dropping stale {:?} from run {}", e.action, e.run_id);
            }
            false
        });
        ready
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
