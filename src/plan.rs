//! Weekly plan state.
//!
//! A `WeeklyPlan` is an owned value holding exactly seven slots in canonical
//! order. All mutation goes through slot-scoped update methods that take an
//! `AttemptTicket`, so a late result from a superseded call can never overwrite
//! newer data. `SharedPlan` wraps the plan for concurrent in-flight calls and
//! publishes a snapshot after every change.

pub mod slot;
pub mod status;

pub use slot::{AttemptTicket, Settlement, SlotPayload, SlotState, SlotStatus};
pub use status::GlobalStatus;

use crate::week::{day_index, WEEK};
use chrono::Weekday;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeeklyPlan {
    slots: [SlotState; 7],
}

impl Default for WeeklyPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl WeeklyPlan {
    pub fn new() -> Self {
        Self {
            slots: WEEK.map(SlotState::new),
        }
    }

    pub fn slot(&self, day: Weekday) -> &SlotState {
        &self.slots[day_index(day)]
    }

    pub(crate) fn slot_mut(&mut self, day: Weekday) -> &mut SlotState {
        &mut self.slots[day_index(day)]
    }

    pub fn slots(&self) -> impl Iterator<Item = &SlotState> {
        self.slots.iter()
    }

    pub fn global_status(&self) -> GlobalStatus {
        GlobalStatus::derive(self.slots.iter().map(SlotState::status))
    }

    /// Move one slot to Pending and return its fencing ticket.
    pub fn begin(&mut self, day: Weekday) -> AttemptTicket {
        self.slot_mut(day).begin()
    }

    /// Move every slot to Pending. Attempt counters keep increasing so calls
    /// from an earlier dispatch are fenced off too.
    pub fn begin_all(&mut self) -> [AttemptTicket; 7] {
        WEEK.map(|day| self.begin(day))
    }

    pub fn settle(
        &mut self,
        ticket: AttemptTicket,
        result: Result<SlotPayload, String>,
    ) -> Settlement {
        self.slot_mut(ticket.day).settle(ticket, result)
    }
}

/// A plan shared by concurrently settling calls on one event loop.
///
/// The lock is only held for the duration of a synchronous update, never
/// across an await.
pub struct SharedPlan {
    plan: Mutex<WeeklyPlan>,
    updates: watch::Sender<WeeklyPlan>,
}

impl Default for SharedPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedPlan {
    pub fn new() -> Self {
        let (updates, _) = watch::channel(WeeklyPlan::new());
        Self {
            plan: Mutex::new(WeeklyPlan::new()),
            updates,
        }
    }

    /// Apply `f` to the plan and publish the resulting snapshot.
    pub fn update<R>(&self, f: impl FnOnce(&mut WeeklyPlan) -> R) -> R {
        let mut plan = self.plan.lock();
        let result = f(&mut plan);
        self.updates.send_replace(plan.clone());
        result
    }

    pub fn read<R>(&self, f: impl FnOnce(&WeeklyPlan) -> R) -> R {
        f(&self.plan.lock())
    }

    pub fn snapshot(&self) -> WeeklyPlan {
        self.plan.lock().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WeeklyPlan> {
        self.updates.subscribe()
    }
}
